//! Integration tests for the full sorting pipeline.
//!
//! Tests cover:
//! - End-to-end placement with and without backup
//! - Failed routing and tally counts
//! - Archive extraction and sub-directory flattening
//! - Fatal errors halting the run

use asset_assistant::core::processor;
use asset_assistant::models::config::{Config, Service};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Env {
    dir: TempDir,
    config: Config,
}

impl Env {
    fn new(service: Service) -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        for name in ["process", "movies", "shows", "collections"] {
            fs::create_dir_all(root.join(name)).unwrap();
        }

        let config = Config {
            process: root.join("process"),
            movies: root.join("movies"),
            shows: root.join("shows"),
            collections: root.join("collections"),
            failed: root.join("failed"),
            backup: root.join("backup"),
            enable_backup: false,
            service,
            plex_specials: None,
            discord_webhook: None,
            discord_enabled: false,
            debug: false,
            log_dir: root.join("logs"),
        };

        Self { dir, config }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    fn folder(&self, relative: &str) {
        fs::create_dir_all(self.path(relative)).unwrap();
    }

    fn image(&self, relative: &str, width: u32, height: u32) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        image::RgbImage::new(width, height).save(&path).unwrap();
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

// ========== PLACEMENT TESTS ==========

#[test]
fn test_kometa_season_end_to_end() {
    let env = Env::new(Service::Kometa);
    env.folder("shows/Breaking Bad (2008)");
    env.image("process/Breaking Bad (2008) - Season 3.jpg", 1000, 1500);

    let report = processor::run(&env.config).unwrap();

    assert_eq!(report.tally.season, 1);
    assert_eq!(report.tally.failed, 0);
    assert!(env.path("shows/Breaking Bad (2008)/Season03.jpg").exists());
    assert_eq!(file_names(&env.path("shows/Breaking Bad (2008)")), vec!["Season03.jpg"]);
    assert!(file_names(&env.path("process")).is_empty());
    assert!(!env.path("backup").exists());
}

#[test]
fn test_backup_keeps_source() {
    let mut env = Env::new(Service::Kometa);
    env.config.enable_backup = true;
    env.folder("shows/Breaking Bad (2008)");
    env.image("process/Breaking Bad (2008) - Season 3.jpg", 1000, 1500);

    let report = processor::run(&env.config).unwrap();

    assert_eq!(report.tally.season, 1);
    assert!(env.path("backup/Breaking Bad (2008) - Season 3.jpg").exists());
    assert!(file_names(&env.path("process")).is_empty());
}

#[test]
fn test_movie_poster_and_background() {
    let env = Env::new(Service::None);
    env.folder("movies/Alien (1979)");
    env.folder("movies/Blade Runner (1982)");
    env.image("process/Alien (1979).png", 1000, 1500);
    env.image("process/Blade Runner (1982).png", 1500, 1000);

    let report = processor::run(&env.config).unwrap();

    assert_eq!(report.tally.movie, 2);
    assert!(env.path("movies/Alien (1979)/poster.png").exists());
    assert!(env.path("movies/Blade Runner (1982)/background.png").exists());
}

#[test]
fn test_plex_episode_end_to_end() {
    let env = Env::new(Service::Plex);
    env.folder("shows/Breaking Bad (2008)/Season 01");
    fs::write(env.path("shows/Breaking Bad (2008)/Season 01/Breaking Bad - S01E02.mkv"), "").unwrap();
    env.image("process/Breaking Bad (2008) - S01E02.jpg", 1920, 1080);

    let report = processor::run(&env.config).unwrap();

    assert_eq!(report.tally.episode, 1);
    assert!(env
        .path("shows/Breaking Bad (2008)/Season 01/Breaking Bad - S01E02.jpg")
        .exists());
    assert!(!env
        .path("shows/Breaking Bad (2008)/Season 01/Breaking Bad (2008) - S01E02.jpg")
        .exists());
}

// ========== FAILURE TESTS ==========

#[test]
fn test_unmatched_goes_to_failed() {
    let env = Env::new(Service::Kometa);
    env.image("process/Random Unmatched Name.jpg", 1000, 1500);

    let report = processor::run(&env.config).unwrap();

    assert_eq!(report.tally.failed, 1);
    assert_eq!(report.tally.placed(), 0);
    assert!(env.path("failed/Random Unmatched Name.jpg").exists());
    assert!(file_names(&env.path("process")).is_empty());
}

#[test]
fn test_missing_season_folder_is_not_created() {
    let env = Env::new(Service::Plex);
    env.folder("shows/Breaking Bad (2008)");
    env.image("process/Breaking Bad (2008) - S02E01.jpg", 1920, 1080);

    let report = processor::run(&env.config).unwrap();

    assert_eq!(report.tally.failed, 1);
    assert!(!env.path("shows/Breaking Bad (2008)/Season 02").exists());
    assert!(env.path("failed/Breaking Bad (2008) - S02E01.jpg").exists());
}

#[test]
fn test_non_image_files_fail() {
    let env = Env::new(Service::Kometa);
    fs::write(env.path("process/notes.txt"), "hello").unwrap();
    env.folder("process/nested");
    fs::write(env.path("process/nested/readme.md"), "hello").unwrap();

    let report = processor::run(&env.config).unwrap();

    assert_eq!(report.tally.failed, 2);
    assert_eq!(file_names(&env.path("failed")), vec!["notes.txt", "readme.md"]);
    assert!(file_names(&env.path("process")).is_empty());
}

#[test]
fn test_plex_specials_unset_halts_run() {
    let env = Env::new(Service::Plex);
    env.folder("shows/Doctor Who (2005)");
    env.image("process/Doctor Who (2005) - Specials.jpg", 1000, 1500);

    let result = processor::run(&env.config);

    assert!(matches!(result, Err(asset_assistant::Error::PlexSpecialsUnset)));
    assert!(env.path("process/Doctor Who (2005) - Specials.jpg").exists());
    assert!(!env.path("failed/Doctor Who (2005) - Specials.jpg").exists());
}

// ========== STAGING TESTS ==========

#[test]
fn test_archive_and_nested_images() {
    let env = Env::new(Service::None);
    env.folder("movies/Alien (1979)");
    env.folder("movies/Blade Runner (1982)");

    // Build the images outside staging, then pack them.
    env.image("work/Alien (1979).png", 1000, 1500);
    env.image("work/Blade Runner (1982).png", 1000, 1500);
    let file = fs::File::create(env.path("process/set.zip")).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    zip.start_file("Alien (1979).png", options).unwrap();
    zip.write_all(&fs::read(env.path("work/Alien (1979).png")).unwrap()).unwrap();
    zip.start_file("extras/Blade Runner (1982).png", options).unwrap();
    zip.write_all(&fs::read(env.path("work/Blade Runner (1982).png")).unwrap()).unwrap();
    zip.finish().unwrap();

    let report = processor::run(&env.config).unwrap();

    assert_eq!(report.tally.movie, 2);
    assert_eq!(report.tally.failed, 0);
    assert!(env.path("movies/Alien (1979)/poster.png").exists());
    assert!(env.path("movies/Blade Runner (1982)/poster.png").exists());
    assert!(file_names(&env.path("process")).is_empty());
}

#[test]
fn test_corrupt_archive_is_counted() {
    let env = Env::new(Service::Kometa);
    fs::write(env.path("process/broken.zip"), "definitely not a zip").unwrap();

    let report = processor::run(&env.config).unwrap();

    assert_eq!(report.tally.failed, 1);
    assert!(env.path("failed/broken.zip").exists());
}
