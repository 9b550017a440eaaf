//! Shared file index populated by a background filesystem walk.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use std::thread;

use ignore::{DirEntry, Error as IgnoreError, WalkBuilder, WalkState};
use tracing::{debug, warn};

use super::ScanProgress;

/// Number of discovered files appended to the index at once.
const APPEND_BATCH: usize = 256;

const BINARY_EXTENSIONS: &[&str] = &[
	"7z", "a", "avif", "bin", "bmp", "class", "dll", "dylib", "exe", "gif", "gz", "ico", "jar",
	"jpeg", "jpg", "lib", "mp3", "mp4", "o", "obj", "otf", "pdf", "png", "pyc", "rlib", "so",
	"tar", "tif", "tiff", "ttf", "wasm", "wav", "webm", "webp", "woff", "woff2", "xz", "zip",
	"zst",
];

/// Walker settings for building a [`FileIndex`].
#[derive(Debug, Clone)]
pub struct IndexOptions {
	/// Include hidden files and directories.
	pub include_hidden: bool,
	/// Follow symbolic links during traversal.
	pub follow_symlinks: bool,
	/// Respect .ignore files.
	pub respect_ignore_files: bool,
	/// Respect .gitignore files.
	pub git_ignore: bool,
	/// Respect global gitignore settings.
	pub git_global: bool,
	/// Respect git exclude files.
	pub git_exclude: bool,
	/// Directory names to always skip.
	pub global_ignores: Vec<String>,
	/// Walker thread count, automatic when `None`.
	pub threads: Option<usize>,
	/// Maximum traversal depth.
	pub max_depth: Option<usize>,
}

impl Default for IndexOptions {
	fn default() -> Self {
		Self {
			include_hidden: false,
			follow_symlinks: false,
			respect_ignore_files: true,
			git_ignore: true,
			git_global: true,
			git_exclude: true,
			global_ignores: [".git", "node_modules", "target", ".venv"]
				.into_iter()
				.map(String::from)
				.collect(),
			threads: None,
			max_depth: None,
		}
	}
}

impl IndexOptions {
	fn thread_count(&self) -> usize {
		self.threads.unwrap_or(0)
	}

	fn global_ignore_set(&self) -> HashSet<OsString> {
		self.global_ignores
			.iter()
			.filter(|name| !name.trim().is_empty())
			.map(OsString::from)
			.collect()
	}
}

/// One file known to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
	/// Path relative to the index root, using `/` separators.
	pub relative: String,
	/// Absolute path on disk.
	pub path: PathBuf,
	/// Whether the extension marks the file as binary.
	pub is_binary: bool,
}

impl FileEntry {
	#[must_use]
	pub fn new(root: &Path, relative: impl Into<String>) -> Self {
		let relative = relative.into();
		let path = root.join(&relative);
		let is_binary = has_binary_extension(&relative);
		Self {
			relative,
			path,
			is_binary,
		}
	}

	/// Key shared by result items and selection memory for this file.
	#[must_use]
	pub fn identifier(&self) -> String {
		self.path.to_string_lossy().into_owned()
	}
}

fn has_binary_extension(relative: &str) -> bool {
	Path::new(relative)
		.extension()
		.and_then(|ext| ext.to_str())
		.map(|ext| ext.to_ascii_lowercase())
		.is_some_and(|ext| BINARY_EXTENSIONS.contains(&ext.as_str()))
}

#[derive(Debug, Default)]
struct IndexShared {
	files: RwLock<Vec<FileEntry>>,
	scanning: AtomicBool,
	scanned: AtomicUsize,
}

/// Cheaply cloneable handle to the files under one root.
///
/// Both reference backends read from the same index, so the walk happens once
/// per process.
#[derive(Debug, Clone)]
pub struct FileIndex {
	shared: Arc<IndexShared>,
}

impl FileIndex {
	/// Build a complete index from known entries without touching the disk.
	#[must_use]
	pub fn from_entries(root: impl Into<PathBuf>, relative_paths: &[&str]) -> Self {
		let root = root.into();
		let files: Vec<FileEntry> = relative_paths
			.iter()
			.map(|relative| FileEntry::new(&root, *relative))
			.collect();
		let shared = IndexShared {
			scanned: AtomicUsize::new(files.len()),
			files: RwLock::new(files),
			scanning: AtomicBool::new(false),
		};
		Self {
			shared: Arc::new(shared),
		}
	}

	/// Start walking `root` on a background thread and return immediately.
	#[must_use]
	pub fn spawn(root: impl Into<PathBuf>, options: IndexOptions) -> Self {
		let root = root.into();
		let shared = Arc::new(IndexShared::default());
		shared.scanning.store(true, Ordering::Release);

		let index = Self {
			shared: Arc::clone(&shared),
		};

		let spawned = thread::Builder::new()
			.name("glint-indexer".into())
			.spawn(move || walk(root, options, shared));
		if let Err(error) = spawned {
			warn!(%error, "failed to spawn indexer thread");
			index.shared.scanning.store(false, Ordering::Release);
		}

		index
	}

	/// Read access to the files discovered so far.
	pub fn files(&self) -> RwLockReadGuard<'_, Vec<FileEntry>> {
		self.shared
			.files
			.read()
			.unwrap_or_else(PoisonError::into_inner)
	}

	/// Copy of the files discovered so far. Callers doing disk I/O per file
	/// use this so the walker can keep appending.
	#[must_use]
	pub fn snapshot(&self) -> Vec<FileEntry> {
		self.files().clone()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.files().len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	#[must_use]
	pub fn progress(&self) -> ScanProgress {
		ScanProgress {
			is_scanning: self.shared.scanning.load(Ordering::Acquire),
			scanned_count: self.shared.scanned.load(Ordering::Acquire),
		}
	}
}

fn walk(root: PathBuf, options: IndexOptions, shared: Arc<IndexShared>) {
	let (file_tx, file_rx) = mpsc::channel::<FileEntry>();
	let walker_root = Arc::new(root);

	let collector_shared = Arc::clone(&shared);
	let collector = thread::spawn(move || {
		let mut batch = Vec::with_capacity(APPEND_BATCH);
		while let Ok(entry) = file_rx.recv() {
			batch.push(entry);
			if batch.len() >= APPEND_BATCH {
				append(&collector_shared, &mut batch);
			}
		}
		append(&collector_shared, &mut batch);
	});

	build_walk(walker_root.as_path(), &options)
		.build_parallel()
		.run(|| {
			let sender = file_tx.clone();
			let root = Arc::clone(&walker_root);
			Box::new(move |entry: Result<DirEntry, IgnoreError>| {
				let Ok(entry) = entry else {
					return WalkState::Continue;
				};
				if !entry.file_type().is_some_and(|kind| kind.is_file()) {
					return WalkState::Continue;
				}

				let path = entry.path();
				let relative = path.strip_prefix(root.as_path()).unwrap_or(path);
				let relative_display = relative.to_string_lossy().replace('\\', "/");
				if sender.send(FileEntry::new(&root, relative_display)).is_err() {
					return WalkState::Quit;
				}
				WalkState::Continue
			})
		});

	drop(file_tx);
	if collector.join().is_err() {
		warn!("index collector thread panicked");
	}
	shared.scanning.store(false, Ordering::Release);
	debug!(
		files = shared.scanned.load(Ordering::Acquire),
		"filesystem scan complete"
	);
}

fn append(shared: &IndexShared, batch: &mut Vec<FileEntry>) {
	if batch.is_empty() {
		return;
	}
	let mut files = shared
		.files
		.write()
		.unwrap_or_else(PoisonError::into_inner);
	files.append(batch);
	shared.scanned.store(files.len(), Ordering::Release);
}

fn build_walk(root: &Path, options: &IndexOptions) -> WalkBuilder {
	let ignores = options.global_ignore_set();
	let mut walker = WalkBuilder::new(root);

	walker
		.hidden(!options.include_hidden)
		.follow_links(options.follow_symlinks)
		.git_ignore(options.git_ignore)
		.git_global(options.git_global)
		.git_exclude(options.git_exclude)
		.ignore(options.respect_ignore_files)
		.parents(true)
		.threads(options.thread_count())
		.max_depth(options.max_depth);

	if !ignores.is_empty() {
		let ignores = Arc::new(ignores);
		walker.filter_entry(move |entry| !ignores.contains(entry.file_name()));
	}

	walker
}
