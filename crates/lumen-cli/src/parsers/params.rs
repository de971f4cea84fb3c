//! Parameter-set parsing for `--sweep` and `--median`/`--gamma`.

use lumen_core::EnhanceParams;

/// Parse a parameter set in format "N:G"
///
/// # Arguments
/// * `value` - median window size and gamma separated by a colon, e.g. "5:2.0"
///
/// # Returns
/// A validated `EnhanceParams`
pub fn parse_param_set(value: &str) -> Result<EnhanceParams, String> {
    let (window, gamma) = value.split_once(':').ok_or_else(|| {
        format!(
            "Parameter set must be in format N:G (e.g., 5:2.0), got: {}",
            value
        )
    })?;

    let window = window
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid median window size: {}", window))?;
    let gamma = gamma
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid gamma: {}", gamma))?;

    EnhanceParams::new(window, gamma).map_err(|e| e.to_string())
}

/// Resolve the parameter sets for `lumen process`.
///
/// Explicit `--sweep` entries win; otherwise a single set is built from
/// `--median` and `--gamma`.
pub fn parse_sweep(
    sweep: &[String],
    median: u32,
    gamma: f64,
) -> Result<Vec<EnhanceParams>, String> {
    if sweep.is_empty() {
        return EnhanceParams::new(median, gamma)
            .map(|params| vec![params])
            .map_err(|e| e.to_string());
    }

    sweep.iter().map(|s| parse_param_set(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param_set() {
        let params = parse_param_set("5:2.0").unwrap();
        assert_eq!(params.median_window_size, 5);
        assert_eq!(params.gamma, 2.0);

        let params = parse_param_set(" 3 : 0.5 ").unwrap();
        assert_eq!(params.median_window_size, 3);
        assert_eq!(params.gamma, 0.5);
    }

    #[test]
    fn test_parse_param_set_integer_gamma() {
        let params = parse_param_set("7:2").unwrap();
        assert_eq!(params.tag(), "7_2.0");
    }

    #[test]
    fn test_parse_param_set_malformed() {
        for input in ["5", "5,2.0", "a:1.0", "5:x", "-3:1.0", ""] {
            assert!(parse_param_set(input).is_err(), "{}", input);
        }
    }

    #[test]
    fn test_parse_param_set_invalid_values() {
        let err = parse_param_set("4:1.0").unwrap_err();
        assert!(err.contains("Invalid parameter"), "{}", err);
        assert!(parse_param_set("3:0").is_err());
        assert!(parse_param_set("3:-1.0").is_err());
        assert!(parse_param_set("3:NaN").is_err());
    }

    #[test]
    fn test_parse_sweep_prefers_explicit_sets() {
        let sweep = vec!["3:0.5".to_string(), "7:2.0".to_string()];
        let runs = parse_sweep(&sweep, 5, 1.0).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].median_window_size, 7);
    }

    #[test]
    fn test_parse_sweep_single_set() {
        let runs = parse_sweep(&[], 5, 1.0).unwrap();
        assert_eq!(runs, vec![EnhanceParams::new(5, 1.0).unwrap()]);
        assert!(parse_sweep(&[], 0, 1.0).is_err());
    }
}
