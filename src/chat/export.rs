//! Writes chart images attached to bot replies to disk.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::Charts;

/// Decodes every chart and writes it to `dir` as `<message_index>_<chart key>.<ext>`.
///
/// Charts that fail to decode are skipped; the returned list holds the files written.
pub fn export_charts(dir: &Path, message_index: usize, charts: &Charts) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|err| Error::io("failed to create chart directory", err))?;
    let mut written = Vec::new();
    for image in charts.images() {
        let Ok(decoded) = image.decode() else {
            continue;
        };
        let path = dir.join(format!(
            "{message_index}_{}.{}",
            image.key,
            decoded.extension()
        ));
        let file =
            File::create(&path).map_err(|err| Error::io("failed to create chart file", err))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(&decoded.data)
            .and_then(|_| writer.flush())
            .map_err(|err| Error::io("failed to write chart file", err))?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_decodable_charts_only() {
        let dir = std::env::temp_dir().join(format!("salesbot-charts-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let charts = Charts::from_payloads(vec![
            "data:image/png;base64,UE5H".to_string(),
            String::new(),
            "data:image/jpeg;base64,SlBH".to_string(),
        ])
        .unwrap();

        let written = export_charts(&dir, 3, &charts).unwrap();
        assert_eq!(
            written,
            vec![dir.join("3_chart_1.png"), dir.join("3_chart_3.jpg")]
        );
        assert_eq!(fs::read(&written[0]).unwrap(), b"PNG");
        assert_eq!(fs::read(&written[1]).unwrap(), b"JPG");
        let _ = fs::remove_dir_all(&dir);
    }
}
