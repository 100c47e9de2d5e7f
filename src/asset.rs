use crate::config::Config;
use std::path::{Path, PathBuf};

/// One of the two generated files an icon font ships with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    pub path: PathBuf,
    pub kind: AssetKind,
}

impl AssetFile {
    pub fn from_path(path: &Path, config: &Config) -> Option<AssetFile> {
        let kind = AssetKind::from_file_name(path, config)?;

        Some(AssetFile {
            path: path.to_owned(),
            kind,
        })
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AssetKind {
    /// The script bundling every glyph as an inline `<symbol>`.
    Sprite,
    /// The stylesheet mapping icon classes to codepoints.
    Stylesheet,
}

impl AssetKind {
    pub fn from_file_name(path: &Path, config: &Config) -> Option<Self> {
        let name = path.file_name()?;
        let name = name.to_str()?;

        if name.eq_ignore_ascii_case(&config.sprite_file_name) {
            Some(AssetKind::Sprite)
        } else if name.eq_ignore_ascii_case(&config.stylesheet_file_name) {
            Some(AssetKind::Stylesheet)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use crate::asset::{AssetFile, AssetKind};
    use crate::config::Config;
    use std::path::Path;

    #[test]
    fn test_classify_assets() {
        let config = Config::default();

        let sprite = AssetFile::from_path(Path::new("/proj/src/assets/iconfont.js"), &config);
        assert_eq!(sprite.map(|a| a.kind), Some(AssetKind::Sprite));

        let kind = AssetKind::from_file_name(Path::new("static/ICONFONT.CSS"), &config);
        assert_eq!(kind, Some(AssetKind::Stylesheet));

        assert_eq!(
            AssetKind::from_file_name(Path::new("iconfont.json"), &config),
            None
        );
        assert_eq!(AssetKind::from_file_name(Path::new("/"), &config), None);
    }
}
