//! Property tests for install layout derivation.

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use proptest::prelude::*;
use ranger_bootstrap::domain::PathsConfig;
use ranger_bootstrap::domain::config::validate_relative;

fn paths(home: &str, certs: &str, exe: &str) -> PathsConfig {
    PathsConfig {
        download_dir: PathBuf::from("/var/tmp/boot"),
        install_dir: PathBuf::from("/opt"),
        ranger_home: PathBuf::from(home),
        certs_subdir: PathBuf::from(certs),
        executable: PathBuf::from(exe),
    }
}

proptest! {
    #[test]
    fn prop_layout_paths_stay_under_their_roots(
        home in "[a-z][a-z0-9_-]{0,15}",
        certs in "[a-z0-9]{1,8}(/[a-z0-9]{1,8}){0,2}",
        exe in "[a-z][a-z0-9._-]{0,10}",
    ) {
        let layout = paths(&home, &certs, &exe).layout().expect("valid layout");
        prop_assert!(layout.install_root.starts_with(&layout.install_dir));
        prop_assert!(layout.certs_dir.starts_with(&layout.install_root));
        prop_assert!(layout.executable.starts_with(&layout.install_root));
        prop_assert!(layout.credentials_archive.starts_with("/var/tmp/boot"));
        prop_assert!(layout.ranger_archive.starts_with("/var/tmp/boot"));
        prop_assert_ne!(&layout.credentials_archive, &layout.ranger_archive);
    }

    #[test]
    fn prop_parent_components_are_always_rejected(
        head in "[a-z]{1,6}",
        tail in "[a-z]{0,6}",
    ) {
        let candidate = PathBuf::from(format!("{head}/../{tail}"));
        prop_assert!(validate_relative("paths.certs_subdir", &candidate).is_err());
    }

    #[test]
    fn prop_absolute_paths_are_always_rejected(name in "[a-z]{1,10}") {
        let candidate = PathBuf::from(format!("/{name}"));
        prop_assert!(validate_relative("paths.executable", &candidate).is_err());
    }
}
