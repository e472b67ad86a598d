//! Octave script synthesis for the LMS equalization experiment.
//!
//! [`generate`] substitutes the four current experiment values into a
//! fixed script template (the `lms_equal` function body plus a trailing
//! driver section) and wraps the result for safe isolated rendering.
//! Same inputs always yield byte-identical output.

use serde::Serialize;

use crate::params::ExperimentInputs;

/* --------------------------------------------------------------------------
   Constants
   -------------------------------------------------------------------------- */

/// Fixed name of the downloadable script file.
pub const SCRIPT_FILENAME: &str = "lms_equalization.m";

/// MIME type offered with the download payload.
pub const SCRIPT_MIME_TYPE: &str = "text/plain";

/// Display text shown before the first generation.
pub const SCRIPT_PLACEHOLDER: &str = "Code will be generated here.";

/* --------------------------------------------------------------------------
   Types
   -------------------------------------------------------------------------- */

/// A synthesized script artifact.
///
/// Overwritten wholesale on each generation; holds no reference back to
/// the parameters that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Script {
    /// Raw generated Octave source.
    pub code: String,
    /// `code` wrapped as a self-contained HTML fragment with special
    /// characters escaped, safe to hand to an isolated preview frame.
    pub display: String,
}

/// Bytes and metadata for offering a [`Script`] as a file download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPayload {
    /// Fixed file name ([`SCRIPT_FILENAME`]).
    pub filename: &'static str,
    /// Fixed MIME type ([`SCRIPT_MIME_TYPE`]).
    pub mime: &'static str,
    /// Exactly the generated script text.
    pub bytes: Vec<u8>,
}

/* --------------------------------------------------------------------------
   Synthesis
   -------------------------------------------------------------------------- */

/// Generate the LMS equalization script for the given inputs.
///
/// Pure and deterministic: the template is a static constant of the
/// system and only the four numeric values vary, rendered in decimal
/// form at their designated positions in the driver section.
pub fn generate(inputs: &ExperimentInputs) -> Script {
    let code = format!(
        r"function lms_equal(N, signal_power, noise_power, mu)
    % N: Number of samples
    % signal_power: Power of the signal
    % noise_power: Power of the noise
    % mu: Step size for LMS algorithm

    h = [2 1];  % Impulse response of channel
    x = sqrt(signal_power) .* randn(1, N);  % Input signal
    d = conv(x, h);
    d = d(1:N) + sqrt(noise_power) .* randn(1, N);  % Introduction of noise

    w0(1) = 0;  % Initial filter weights
    w1(1) = 0;

    y(1) = w0(1) * x(1);  % Filter output
    e(1) = d(1) - y(1);  % Error signal
    w0(2) = w0(1) + 2 * mu * e(1) * x(1);  % Update weights
    w1(2) = w1(1);  % Update weights

    for n = 2:N  % LMS algorithm
        y(n) = w0(n) * x(n) + w1(n) * x(n-1);  % Filter output
        e(n) = d(n) - y(n);  % Error signal
        w0(n+1) = w0(n) + mu * e(n) * x(n);  % Update weight
        w1(n+1) = w1(n) + mu * e(n) * x(n-1);  % Update weight
    endfor

    mse = zeros(1, N);
    for i = 1:N
        mse(i) = abs(e(i)).^2;
    endfor

    n = 1:N;
    semilogy(n, mse);  % MSE versus time
    xlabel('Adaptation cycles');
    ylabel('MSE');
    title('Adaptation cycles vs. MSE');
endfunction

N = {n};  % Number of samples
signal_power = {signal_power};  % Signal power
noise_power = {noise_power};  % Noise power
mu = {mu};  % Step size for LMS algorithm

lms_equal(N, signal_power, noise_power, mu);
",
        n = inputs.num_samples,
        signal_power = inputs.signal_power,
        noise_power = inputs.noise_power,
        mu = inputs.step_size,
    );

    let display = format!("<pre>{}</pre>", escape_html(&code));
    Script { code, display }
}

/// Build the download payload for a generated script.
///
/// The byte content is exactly the last-generated `code`; the name and
/// MIME type are fixed constants.
pub fn download_payload(script: &Script) -> DownloadPayload {
    DownloadPayload {
        filename: SCRIPT_FILENAME,
        mime: SCRIPT_MIME_TYPE,
        bytes: script.code.clone().into_bytes(),
    }
}

/// Escape HTML-special characters so embedded text can never be
/// interpreted as markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParameterSet;

    fn default_inputs() -> ExperimentInputs {
        ParameterSet::defaults().experiment_inputs().unwrap()
    }

    // --- Determinism ---

    #[test]
    fn generate_is_deterministic() {
        let inputs = default_inputs();
        assert_eq!(generate(&inputs), generate(&inputs));
    }

    // --- Value substitution ---

    #[test]
    fn generate_embeds_default_values_in_driver_section() {
        let script = generate(&default_inputs());
        assert!(script.code.contains("N = 500;"));
        assert!(script.code.contains("signal_power = 0.01;"));
        assert!(script.code.contains("noise_power = 0.001;"));
        assert!(script.code.contains("mu = 0.01;"));
    }

    #[test]
    fn generate_tracks_edited_values() {
        let mut set = ParameterSet::defaults();
        set.set_value(crate::params::PARAM_NUM_SAMPLES, 250.0);
        set.set_value(crate::params::PARAM_STEP_SIZE, 0.05);
        let script = generate(&set.experiment_inputs().unwrap());
        assert!(script.code.contains("N = 250;"));
        assert!(script.code.contains("mu = 0.05;"));
    }

    #[test]
    fn generate_keeps_the_function_body_fixed() {
        let script = generate(&default_inputs());
        assert!(script
            .code
            .starts_with("function lms_equal(N, signal_power, noise_power, mu)"));
        assert!(script.code.contains("semilogy(n, mse);"));
        assert!(script
            .code
            .ends_with("lms_equal(N, signal_power, noise_power, mu);\n"));
    }

    // --- Display wrapper ---

    #[test]
    fn display_wraps_escaped_code_in_pre() {
        let script = generate(&default_inputs());
        assert!(script.display.starts_with("<pre>"));
        assert!(script.display.ends_with("</pre>"));
        // The Octave quotes must arrive escaped, not as raw markup.
        assert!(script.display.contains("&#39;MSE&#39;"));
        assert!(!script.display[5..script.display.len() - 6].contains('\''));
    }

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<b a="1">&'"#),
            "&lt;b a=&quot;1&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn escape_html_passes_plain_text_through() {
        assert_eq!(escape_html("mu = 0.01;"), "mu = 0.01;");
    }

    // --- Download payload ---

    #[test]
    fn download_payload_contains_exact_code_bytes() {
        let script = generate(&default_inputs());
        let payload = download_payload(&script);
        assert_eq!(payload.filename, SCRIPT_FILENAME);
        assert_eq!(payload.mime, SCRIPT_MIME_TYPE);
        assert_eq!(payload.bytes, script.code.as_bytes());
    }
}
