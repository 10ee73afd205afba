use std::{
    fs::File,
    io::{self, Write},
    path::Path,
};

use anyhow::Context;
use blockfall_engine::GameConfig;

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Reads a game config file and checks its values.
pub fn read_config_file<P>(path: P) -> anyhow::Result<GameConfig>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let config: GameConfig = read_json_file("config", path)?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    Ok(config)
}

pub fn write_json_pretty<W, T>(writer: &mut W, target: &str, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: serde::Serialize,
{
    serde_json::to_writer_pretty(&mut *writer, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writeln!(writer).with_context(|| format!("Failed to write newline to {target}"))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush output to {target}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf};

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("blockfall-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_default_config_round_trips_through_file() {
        let path = temp_path("default.json");
        let mut buf = Vec::new();
        write_json_pretty(&mut buf, "buffer", &GameConfig::default()).unwrap();
        fs::write(&path, &buf).unwrap();

        let config = read_config_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config, GameConfig::default());
        assert!(buf.ends_with(b"}\n"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let path = temp_path("partial.json");
        fs::write(&path, r#"{ "lines_per_level": 5 }"#).unwrap();

        let config = read_config_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.lines_per_level, 5);
        assert_eq!(config.line_clear_points, GameConfig::default().line_clear_points);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let path = temp_path("invalid.json");
        fs::write(&path, r#"{ "drop_interval_decay": 1.5 }"#).unwrap();

        let err = read_config_file(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(format!("{err:#}").contains("Invalid config file"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = temp_path("missing.json");
        let err = read_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to open config file"));
    }
}
