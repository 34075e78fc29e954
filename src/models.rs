use crate::error::{ConfigError, Result, StatsError};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Field delimiter of the input table. Observed as `,` or `;` depending on the data vintage.
    pub delimiter: char,
    /// Count the employer's state when the work state of a certified case is blank.
    pub employer_state_fallback: bool,
}

fn config_error(file_path: &str, source: ConfigError) -> StatsError {
    StatsError::Config {
        path: file_path.into(),
        source,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: ',',
            employer_state_fallback: false,
        }
    }
}

impl Config {
    pub fn load_from_file(file_path: &str) -> Result<Self> {
        let load = || -> std::result::Result<Self, ConfigError> {
            let content = std::fs::read_to_string(file_path)?;
            Ok(toml::from_str(&content)?)
        };
        load().map_err(|source| config_error(file_path, source))
    }

    pub fn save_to_file(&self, file_path: &str) -> Result<()> {
        let save = || -> std::result::Result<(), ConfigError> {
            let content = toml::to_string_pretty(self)?;
            std::fs::write(file_path, content)?;
            Ok(())
        };
        save().map_err(|source| config_error(file_path, source))
    }

    /// The delimiter as the single byte the csv reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(StatsError::InvalidDelimiter(self.delimiter))
        }
    }
}

/// Semantic role a header column can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Status,
    CaseId,
    Occupation,
    WorkState,
    EmployerState,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Status => "status",
            Role::CaseId => "case_id",
            Role::Occupation => "occupation",
            Role::WorkState => "work_state",
            Role::EmployerState => "employer_state",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub name: String,
}

/// Header positions of every role the aggregator reads. Built once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRoles {
    pub status: Column,
    pub case_id: Column,
    pub occupation: Column,
    pub work_state: Column,
    pub employer_state: Option<Column>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub label: String,
    pub count: u64,
    /// Share of the certified total, already rounded to one decimal place.
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Occupations,
    States,
}

impl ReportKind {
    pub fn header(&self) -> &'static str {
        match self {
            ReportKind::Occupations => "TOP_OCCUPATIONS;NUMBER_CERTIFIED_APPLICATIONS;PERCENTAGE",
            ReportKind::States => "TOP_STATES;NUMBER_CERTIFIED_APPLICATIONS;PERCENTAGE",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Occupations => f.write_str("occupations report"),
            ReportKind::States => f.write_str("states report"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_survives_a_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path = path.to_str().unwrap();

        let config = Config {
            delimiter: ';',
            employer_state_fallback: true,
        };
        config.save_to_file(path).unwrap();

        assert_eq!(Config::load_from_file(path).unwrap(), config);
    }

    #[test]
    fn missing_config_keys_take_defaults() {
        let config: Config = toml::from_str("delimiter = \";\"").unwrap();
        assert_eq!(config.delimiter, ';');
        assert!(!config.employer_state_fallback);
    }

    #[test]
    fn unparsable_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "delimiter = 44").unwrap();
        let path = path.to_str().unwrap();

        let err = Config::load_from_file(path).unwrap_err();
        assert!(matches!(
            err,
            StatsError::Config {
                source: ConfigError::Parse(_),
                ..
            }
        ));
        assert!(err.to_string().contains("config.toml"));

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load_from_file(missing.to_str().unwrap()),
            Err(StatsError::Config {
                source: ConfigError::Io(_),
                ..
            })
        ));
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        let config = Config {
            delimiter: '§',
            ..Config::default()
        };
        assert!(matches!(
            config.delimiter_byte(),
            Err(StatsError::InvalidDelimiter('§'))
        ));
        assert_eq!(Config::default().delimiter_byte().unwrap(), b',');
    }
}
