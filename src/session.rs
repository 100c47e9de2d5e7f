use crate::actions::IconDetails;
use crate::config::Config;
use crate::parse::{AssetReader, FsReader, LoadReport, load};
use crate::registry::GlyphRegistry;
use crate::render::{GlyphImage, ImageCache};
use crate::scan::{Occurrence, Position, Scanner};
use crate::schedule::RescanScheduler;
use crate::search::{AssetEvent, AssetLocations, AssetSearch};
use crate::store::{CorrelationStore, DocumentId};
use std::borrow::Cow;
use std::time::Instant;

/// A document open in the host editor.
pub trait Document {
    fn id(&self) -> &DocumentId;

    /// The editor's language id, e.g. `scss` or `typescriptreact`.
    fn language_id(&self) -> &str;

    fn line_count(&self) -> usize;

    fn line(&self, index: usize) -> Option<Cow<'_, str>>;

    fn text(&self) -> Cow<'_, str> {
        let lines = (0..self.line_count())
            .filter_map(|index| self.line(index))
            .collect::<Vec<_>>();

        Cow::Owned(lines.join("\n"))
    }
}

/// A [Document] backed by a plain string.
#[derive(Debug, Clone)]
pub struct TextDocument {
    pub id: DocumentId,
    pub language_id: String,
    pub text: String,
}

impl TextDocument {
    pub fn new(
        id: impl Into<DocumentId>,
        language_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            language_id: language_id.into(),
            text: text.into(),
        }
    }
}

impl Document for TextDocument {
    fn id(&self) -> &DocumentId {
        &self.id
    }

    fn language_id(&self) -> &str {
        &self.language_id
    }

    fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        self.text.lines().nth(index).map(Cow::Borrowed)
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }
}

/// Ties the icon font of one workspace to the documents the user works on.
///
/// The host forwards its editor events to a `Session` and reads results back
/// from it. Everything happens synchronously inside those calls: a reload has
/// fully rebuilt the registry before the scan that follows it starts.
///
/// # Example
///
/// ```no_run
/// use iconfont_lens::{AssetSearch, Config, Position, Session, TextDocument};
///
/// let mut session = Session::new(Config::default(), AssetSearch::from(["/home/me/project"]))?;
/// session.activate();
///
/// let doc = TextDocument::new("file:///home/me/project/App.tsx", "typescriptreact", r#"<Icon name="icon-home" />"#);
/// session.document_switched(&doc);
///
/// if let Some(icon) = session.lookup(&doc.id, Position::new(0, 14)) {
///     println!("hovering {}", icon.name);
/// }
/// # Ok::<(), regex::Error>(())
/// ```
#[derive(Debug)]
pub struct Session<R = FsReader> {
    config: Config,
    search: AssetSearch,
    reader: R,
    locations: AssetLocations,
    registry: GlyphRegistry,
    scanner: Scanner,
    store: CorrelationStore,
    images: ImageCache,
    scheduler: RescanScheduler,
}

impl Session<FsReader> {
    pub fn new(config: Config, search: AssetSearch) -> Result<Self, regex::Error> {
        Self::with_reader(config, search, FsReader)
    }
}

impl<R: AssetReader> Session<R> {
    pub fn with_reader(config: Config, search: AssetSearch, reader: R) -> Result<Self, regex::Error> {
        let scanner = Scanner::new(&config)?;

        Ok(Self {
            registry: GlyphRegistry::new(config.prefixes.clone()),
            scheduler: RescanScheduler::new(config.debounce),
            scanner,
            search,
            reader,
            locations: AssetLocations::default(),
            store: CorrelationStore::new(),
            images: ImageCache::new(),
            config,
        })
    }

    /// Finds the asset files and loads them.
    pub fn activate(&mut self) -> LoadReport {
        self.locations = self.search.find_assets(&self.config);

        if self.locations.is_empty() {
            #[cfg(feature = "log")]
            log::debug!("no icon font found below {:?}", self.search.roots);
        }

        self.reload()
    }

    /// Rebuilds the registry from the known asset files.
    ///
    /// Everything derived from the old registry is dropped.
    pub fn reload(&mut self) -> LoadReport {
        self.store.clear();
        self.images.clear();

        load(&mut self.registry, &self.locations, &self.reader)
    }

    /// Handles a file watcher event.
    ///
    /// Events about asset files trigger a search, a reload and a rescan of the
    /// active document; anything else is ignored and returns `None`.
    pub fn assets_changed(
        &mut self,
        event: &AssetEvent,
        active: Option<&dyn Document>,
    ) -> Option<LoadReport> {
        if !self.search.is_relevant(event, &self.config) {
            return None;
        }

        #[cfg(feature = "log")]
        log::debug!("icon font asset {:?} {:?}, reloading", event.path, event.change);

        let report = self.activate();

        if let Some(document) = active {
            self.scheduler.cancel();
            self.scan(document);
        }

        Some(report)
    }

    /// The user switched to `document`: it is scanned right away.
    pub fn document_switched(&mut self, document: &dyn Document) -> &[Occurrence] {
        self.scheduler.cancel();
        self.scan(document)
    }

    /// The active document was edited; it will be rescanned after a quiet period.
    pub fn document_edited(&mut self, now: Instant) {
        self.scheduler.schedule(now);
    }

    /// Rescans `document` if an edit's quiet period is over.
    ///
    /// Returns whether a scan happened.
    pub fn poll(&mut self, now: Instant, document: &dyn Document) -> bool {
        if !self.scheduler.poll(now) {
            return false;
        }

        self.scan(document);
        true
    }

    /// Images have to be rendered again after a theme change.
    pub fn theme_changed(&mut self, active: Option<&dyn Document>) {
        self.images.clear();

        if let Some(document) = active {
            self.scan(document);
        }
    }

    /// Scans `document` now, replacing what was known about it.
    pub fn scan(&mut self, document: &dyn Document) -> &[Occurrence] {
        let id = document.id().clone();

        let occurrences = match self.config.language_kind(document.language_id()) {
            Some(kind) => self.scanner.scan(&document.text(), kind, &self.registry),
            None => Vec::new(),
        };

        self.store.replace(id.clone(), occurrences);
        self.store.occurrences(&id)
    }

    pub fn lookup(&self, document: &DocumentId, position: Position) -> Option<&Occurrence> {
        self.store.lookup(document, position)
    }

    pub fn at_line(&self, document: &DocumentId, line: usize) -> Option<&Occurrence> {
        self.store.at_line(document, line)
    }

    /// The image for an icon name, rendered on first use.
    pub fn image(&mut self, name: &str) -> Option<&GlyphImage> {
        self.images
            .get_or_render(name, &self.registry, &self.config.render)
    }

    pub fn details(&self, occurrence: &Occurrence) -> IconDetails {
        IconDetails::describe(occurrence, &self.registry)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn locations(&self) -> &AssetLocations {
        &self.locations
    }

    pub fn registry(&self) -> &GlyphRegistry {
        &self.registry
    }

    pub fn store(&self) -> &CorrelationStore {
        &self.store
    }

    pub fn scheduler(&self) -> &RescanScheduler {
        &self.scheduler
    }
}
