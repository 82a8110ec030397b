use std::path::Path;
use walkdir::DirEntry;

pub fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Json,
}

pub fn document_format(path: &Path) -> Option<DocumentFormat> {
    let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
    match ext.as_str() {
        "toml" => Some(DocumentFormat::Toml),
        "json" => Some(DocumentFormat::Json),
        _ => None,
    }
}

pub fn should_visit(entry: &DirEntry, excludes: &[String]) -> bool {
    if !entry.file_type().is_dir() {
        return true;
    }

    let dir_name = entry.file_name().to_string_lossy();
    !excludes
        .iter()
        .any(|excluded| excluded.eq_ignore_ascii_case(&dir_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_document_format_by_extension() {
        assert_eq!(
            document_format(Path::new("tours/north.TOML")),
            Some(DocumentFormat::Toml)
        );
        assert_eq!(
            document_format(Path::new("tours.json")),
            Some(DocumentFormat::Json)
        );
        assert_eq!(document_format(Path::new("README.md")), None);
        assert_eq!(document_format(Path::new("tours")), None);
    }

    #[test]
    fn relative_path_uses_forward_slashes() {
        let root = Path::new("/data");
        assert_eq!(
            relative_path(root, Path::new("/data/north/sapa.toml")),
            "north/sapa.toml"
        );
    }
}
