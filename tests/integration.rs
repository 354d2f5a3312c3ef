//! Integration tests for chains of real providers.
//!
//! These tests verify that:
//! 1. A compiled-in bundle and a live directory compose in probe order
//! 2. Append order decides which provider masks which
//! 3. Exhausted chains report a single generic error
//! 4. Chains are providers themselves and nest

use chainedfs::*;
use include_dir::{Dir, include_dir};
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/demos");

fn bundle() -> EmbeddedFs {
    EmbeddedFs::new(&ASSETS).with_prefix("bindata")
}

fn bundled_index() -> &'static str {
    ASSETS
        .get_file("bindata/index.html")
        .and_then(|f| f.contents_utf8())
        .unwrap()
}

fn read(mut file: Box<dyn File>) -> String {
    let mut s = String::new();
    file.read_to_string(&mut s).unwrap();
    s
}

/// `[live, bundle]`: the bundle was appended last and is probed first.
fn bundle_on_top(live: &Path) -> ChainedFileSystem {
    ChainedFileSystem::new(vec![Box::new(DirFs::new(live)), Box::new(bundle())])
}

/// `[bundle, live]`: the live directory was appended last and is probed first.
fn live_on_top(live: &Path) -> ChainedFileSystem {
    ChainedFileSystem::new(vec![Box::new(bundle()), Box::new(DirFs::new(live))])
}

// =============================================================================
// Override
// =============================================================================

#[test]
fn bundle_serves_file_missing_from_live_dir() {
    let live = tempfile::tempdir().unwrap();
    let chain = bundle_on_top(live.path());

    let file = chain.open("/index.html").unwrap();
    assert_eq!(read(file), bundled_index());
}

#[test]
fn bundle_on_top_shadows_live_copy() {
    let live = tempfile::tempdir().unwrap();
    fs::write(live.path().join("index.html"), "<h1>live</h1>").unwrap();
    let chain = bundle_on_top(live.path());

    assert_eq!(read(chain.open("/index.html").unwrap()), bundled_index());
}

#[test]
fn live_dir_fills_gaps_below_bundle() {
    let live = tempfile::tempdir().unwrap();
    fs::write(live.path().join("extra.txt"), "extra").unwrap();
    let chain = bundle_on_top(live.path());

    assert_eq!(read(chain.open("/extra.txt").unwrap()), "extra");
}

// =============================================================================
// Masking
// =============================================================================

#[test]
fn live_file_created_later_masks_bundle() {
    let live = tempfile::tempdir().unwrap();
    let chain = live_on_top(live.path());

    assert_eq!(read(chain.open("/index.html").unwrap()), bundled_index());

    fs::write(live.path().join("index.html"), "<h1>live</h1>").unwrap();
    assert_eq!(read(chain.open("/index.html").unwrap()), "<h1>live</h1>");

    fs::remove_file(live.path().join("index.html")).unwrap();
    assert_eq!(read(chain.open("/index.html").unwrap()), bundled_index());
}

#[test]
fn masking_is_per_file() {
    let live = tempfile::tempdir().unwrap();
    fs::write(live.path().join("style.css"), "body { color: red; }").unwrap();
    let chain = live_on_top(live.path());

    assert_eq!(
        read(chain.open("/style.css").unwrap()),
        "body { color: red; }"
    );
    assert_eq!(read(chain.open("/index.html").unwrap()), bundled_index());
}

#[test]
fn overlay_matches_append_order() {
    let live = tempfile::tempdir().unwrap();
    fs::write(live.path().join("index.html"), "<h1>live</h1>").unwrap();

    let chain = bundle().overlay(DirFs::new(live.path()));
    assert_eq!(chain.read_to_string("/index.html").unwrap(), "<h1>live</h1>");
}

// =============================================================================
// Total miss
// =============================================================================

#[test]
fn total_miss_is_generic() {
    let live = tempfile::tempdir().unwrap();
    let chain = live_on_top(live.path());

    let err = chain.open("/missing.html").unwrap_err();
    assert!(matches!(err, FsError::DoesNotExist));
    assert_eq!(err.to_string(), "does not exist");
    assert!(!err.to_string().contains("missing.html"));
}

#[test]
fn rejected_path_is_still_generic() {
    let live = tempfile::tempdir().unwrap();
    let chain = live_on_top(live.path());

    let err = chain.open("/bad\0name").unwrap_err();
    assert!(matches!(err, FsError::DoesNotExist));
}

#[test]
fn open_traced_explains_total_miss() {
    let live = tempfile::tempdir().unwrap();
    let chain = live_on_top(live.path());

    let err = chain.open_traced("/missing.html").unwrap_err();
    assert_eq!(err.failures.len(), 2);
    assert_eq!(err.failures[0].index, 1);
    assert_eq!(err.failures[1].index, 0);
    assert!(err.failures.iter().all(|f| f.error.is_not_found()));
}

#[test]
fn empty_chain_is_generic() {
    let chain = ChainedFileSystem::new(Vec::new());
    for path in ["", "/", "/index.html"] {
        assert!(matches!(
            chain.open(path).unwrap_err(),
            FsError::DoesNotExist
        ));
    }
}

// =============================================================================
// Handles
// =============================================================================

#[test]
fn directories_resolve_through_the_chain() {
    let live = tempfile::tempdir().unwrap();
    fs::create_dir(live.path().join("docs")).unwrap();
    let chain = live_on_top(live.path());

    let mut root = chain.open("/").unwrap();
    assert!(root.stat().unwrap().is_dir());
    // The live root wins the probe, so the listing is the live one.
    let names: Vec<String> = root.read_dir().unwrap().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["docs"]);
}

#[test]
fn repeated_opens_agree() {
    let live = tempfile::tempdir().unwrap();
    let chain = live_on_top(live.path());

    for _ in 0..3 {
        assert!(chain.open("/index.html").is_ok());
        assert!(chain.open("/missing.html").is_err());
    }
}

#[test]
fn nested_chains_compose() {
    let live = tempfile::tempdir().unwrap();
    let hotfix = tempfile::tempdir().unwrap();
    fs::write(hotfix.path().join("style.css"), "/* hotfix */").unwrap();

    let inner = live_on_top(live.path());
    let outer = inner.overlay(DirFs::new(hotfix.path()));

    assert_eq!(outer.read_to_string("/style.css").unwrap(), "/* hotfix */");
    assert_eq!(outer.read_to_string("/index.html").unwrap(), bundled_index());
}

#[test]
fn chain_shared_across_threads() {
    let live = tempfile::tempdir().unwrap();
    let chain: Arc<dyn FileSystem> = Arc::new(live_on_top(live.path()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let chain = Arc::clone(&chain);
            std::thread::spawn(move || chain.read_to_string("/index.html").unwrap())
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), bundled_index());
    }
}
