// Validate a config file

use super::load_config;
use std::io::Write;
use std::path::Path;

/// Print the resolved config as TOML, or fail with the validation errors
pub fn run(config_path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    writeln!(out, "# {} is valid", config_path.display())?;
    write!(out, "{}", config.to_toml_string()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::tests::{write_config, write_file, reviewer};

    #[test]
    fn test_defaults_are_filled_in() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let mut out = Vec::new();
        run(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let reviewer = reviewer();
        assert!(text.contains(&format!("reviewer = \"{reviewer}\"")));
        assert!(text.contains("max_assignment_id = 1000000"));
        assert!(text.contains("max_grade = 100"));
    }

    #[test]
    fn test_out_of_range_bounds_fail() {
        let dir = tempfile::tempdir().unwrap();
        let reviewer = reviewer();
        let config = write_file(
            dir.path(),
            "grade-review.toml",
            &format!("reviewer = \"{reviewer}\"\nmax_reason_len = 0\n"),
        );
        let err = run(&config, &mut Vec::<u8>::new()).unwrap_err();
        assert!(format!("{err:#}").contains("max_reason_len"));
    }
}
