use crate::asset::{AssetFile, AssetKind};
use crate::config::Config;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Icon font assets are looked for below a set of root directories.
///
/// Usually that is just the workspace root the editor has open, but a host
/// with several workspace folders can search all of them.
/// The first sprite and the first stylesheet found win, where files closer to
/// a root are found before deeper ones, and earlier roots before later ones.
///
/// # Example
///
/// ```no_run
/// use iconfont_lens::{AssetSearch, Config};
///
/// let locations = AssetSearch::from(["/home/me/project"]).find_assets(&Config::default());
///
/// if let Some(sprite) = &locations.sprite {
///     println!("sprite lives at {:?}", sprite.path);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AssetSearch {
    pub roots: Vec<PathBuf>,
}

impl AssetSearch {
    /// Add a list of root directories to this `AssetSearch`
    pub fn append<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.roots.extend(roots.into_iter().map(Into::into));
        self
    }

    pub fn find_assets(&self, config: &Config) -> AssetLocations {
        let mut locations = AssetLocations::default();

        for root in &self.roots {
            let mut found = WalkDir::new(root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| entry.depth() == 0 || !is_excluded_dir(entry, config))
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(_e) => {
                        #[cfg(feature = "log")]
                        log::debug!("skipping unreadable entry: {_e}");

                        None
                    }
                })
                .filter(|entry| entry.file_type().is_file())
                .filter_map(|entry| {
                    let file = AssetFile::from_path(entry.path(), config)?;
                    Some((entry.depth(), file))
                })
                .collect::<Vec<_>>();

            // `iconfont.css` next to the sources beats some copy buried in a
            // build directory; the sort is stable, so name order holds per depth
            found.sort_by_key(|(depth, _)| *depth);

            for (_, file) in found {
                locations.offer(file);
            }

            if locations.is_complete() {
                break;
            }
        }

        locations
    }

    /// Whether a file-system event concerns an asset file and should trigger a reload.
    ///
    /// Events from outside the roots or from inside excluded directories are ignored.
    pub fn is_relevant(&self, event: &AssetEvent, config: &Config) -> bool {
        if AssetKind::from_file_name(&event.path, config).is_none() {
            return false;
        }

        if !self.roots.iter().any(|root| event.path.starts_with(root)) {
            return false;
        }

        !event
            .path
            .ancestors()
            .skip(1)
            .any(|ancestor| is_excluded(ancestor, config))
    }
}

fn is_excluded_dir(entry: &DirEntry, config: &Config) -> bool {
    entry.file_type().is_dir() && is_excluded(entry.path(), config)
}

fn is_excluded(dir: &Path, config: &Config) -> bool {
    dir.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| config.excluded_dirs.iter().any(|excluded| excluded == name))
}

/// Where the sprite and stylesheet of the icon font were found, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetLocations {
    pub sprite: Option<AssetFile>,
    pub stylesheet: Option<AssetFile>,
}

impl AssetLocations {
    fn offer(&mut self, file: AssetFile) {
        let slot = match file.kind {
            AssetKind::Sprite => &mut self.sprite,
            AssetKind::Stylesheet => &mut self.stylesheet,
        };

        if slot.is_none() {
            *slot = Some(file);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.sprite.is_some() && self.stylesheet.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.sprite.is_none() && self.stylesheet.is_none()
    }
}

/// A change to a file, as reported by the host's file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEvent {
    pub path: PathBuf,
    pub change: AssetChange,
}

impl AssetEvent {
    pub fn new(path: impl Into<PathBuf>, change: AssetChange) -> Self {
        Self {
            path: path.into(),
            change,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AssetChange {
    Created,
    Changed,
    Deleted,
}

/// Searches the given root directories, in order.
impl<I, P> From<I> for AssetSearch
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    fn from(value: I) -> Self {
        let roots = value.into_iter().map(Into::into).collect();

        AssetSearch { roots }
    }
}

impl Default for AssetSearch {
    /// Searches the current working directory.
    fn default() -> Self {
        let roots = std::env::current_dir().into_iter().collect::<Vec<_>>();

        roots.into()
    }
}
