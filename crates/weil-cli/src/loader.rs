//! Zero-Table Loader
//!
//! Reads zero ordinates from a local text file, one per line, in the
//! layout of the published zeta-zero tables: optional index columns are
//! tolerated by taking the last whitespace-separated token on each
//! line. Blank and unparseable lines are skipped.
//!
//! This is the external zero-source collaborator, deliberately outside
//! the formula core: the core only ever consumes the resulting
//! validated sequence. No network access — fetching and caching are
//! out of scope.

use rug::Float;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use weil_core::PrecisionContext;
use weil_formula::{zeros, FormulaError, ZeroSequence};

/// Errors from loading a zero table.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Underlying file I/O failure
    #[error("Failed to read zero table: {0}")]
    Io(#[from] std::io::Error),

    /// The file held fewer usable ordinates than requested
    #[error("Zero table holds {found} usable ordinates, {requested} requested")]
    NotEnoughZeros { requested: usize, found: usize },

    /// The parsed sequence failed validation or reference verification
    #[error("Zero table rejected: {0}")]
    Invalid(#[from] FormulaError),
}

/// Load the first `count` ordinates from `path` and validate them.
///
/// The sequence is checked for ascending nonnegative order and its
/// leading entries are verified against the reference table before it
/// is handed to any evaluator.
pub fn load_zeros(
    path: &Path,
    count: usize,
    ctx: &PrecisionContext,
) -> Result<ZeroSequence, LoaderError> {
    let text = std::fs::read_to_string(path)?;

    let mut gammas: Vec<Float> = Vec::with_capacity(count);
    for line in text.lines() {
        if gammas.len() >= count {
            break;
        }
        let Some(token) = line.split_whitespace().last() else {
            continue;
        };
        match ctx.parse_float(token) {
            Ok(value) => gammas.push(value),
            Err(_) => {
                debug!(line, "skipping unparseable line");
            }
        }
    }

    if gammas.len() < count {
        return Err(LoaderError::NotEnoughZeros {
            requested: count,
            found: gammas.len(),
        });
    }

    let sequence = ZeroSequence::from_ascending(gammas)?;
    zeros::verify_leading(&sequence, ctx)?;
    info!(
        count = sequence.len(),
        path = %path.display(),
        "loaded and verified zero table"
    );
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use weil_core::REFERENCE_GAMMAS;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("weil-loader-{}-{}", std::process::id(), name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn ctx() -> PrecisionContext {
        PrecisionContext::new(50).unwrap()
    }

    #[test]
    fn test_loads_reference_zeros() {
        let content = REFERENCE_GAMMAS.join("\n");
        let path = write_temp("plain", &content);
        let zeros = load_zeros(&path, 5, &ctx()).unwrap();
        assert_eq!(zeros.len(), 5);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_takes_last_token() {
        // Indexed table layout: "n gamma_n"
        let content = REFERENCE_GAMMAS
            .iter()
            .enumerate()
            .map(|(i, g)| format!("{} {}", i + 1, g))
            .collect::<Vec<_>>()
            .join("\n");
        let path = write_temp("indexed", &content);
        let zeros = load_zeros(&path, 5, &ctx()).unwrap();
        assert_eq!(zeros.len(), 5);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_skips_blank_lines() {
        let content = format!(
            "\n{}\n\n{}\n{}\n{}\n{}\n",
            REFERENCE_GAMMAS[0],
            REFERENCE_GAMMAS[1],
            REFERENCE_GAMMAS[2],
            REFERENCE_GAMMAS[3],
            REFERENCE_GAMMAS[4]
        );
        let path = write_temp("blanks", &content);
        let zeros = load_zeros(&path, 5, &ctx()).unwrap();
        assert_eq!(zeros.len(), 5);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_not_enough_zeros() {
        let path = write_temp("short", REFERENCE_GAMMAS[0]);
        let err = load_zeros(&path, 5, &ctx()).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::NotEnoughZeros {
                requested: 5,
                found: 1
            }
        ));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_rejects_wrong_reference() {
        let content = "1.0\n2.0\n3.0\n4.0\n5.0";
        let path = write_temp("wrong", content);
        let err = load_zeros(&path, 5, &ctx()).unwrap_err();
        assert!(matches!(err, LoaderError::Invalid(_)));
        std::fs::remove_file(path).ok();
    }
}
