use super::{clone_specs, copy_tree, init_mojo, link_activate};
use crate::paths::GoMojoPaths;
use std::fs;
use std::path::{Path, PathBuf};

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, contents.as_bytes()).expect("write file");
}

fn local_specs(root: &Path) -> PathBuf {
    let specs = root.join("local-specs");
    write_file(
        &specs.join("specs/full_stack/next_ha/stein/manifest"),
        "script config=predeploy.sh\n",
    );
    write_file(&specs.join("helper/utils/mojo_os_utils.py"), "# utils\n");
    std::os::unix::fs::symlink(
        "../../../../helper/utils/mojo_os_utils.py",
        specs.join("specs/full_stack/next_ha/stein/mojo_os_utils.py"),
    )
    .expect("create relative symlink");
    std::os::unix::fs::symlink("does-not-exist", specs.join("dangling"))
        .expect("create dangling symlink");
    specs
}

#[test]
fn preserve_venv_with_marker_keeps_tooling_dir() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let paths = GoMojoPaths::new(dir.path().join("go-mojo"));
    let sentinel = paths.charm_test_infra_dir().join("sentinel");
    write_file(&sentinel, "built");
    write_file(&paths.venv_activate(), "# activate\n");
    let specs = local_specs(dir.path());

    init_mojo(&paths, false, Some(&specs)).expect("init with preserved venv");

    assert_eq!(fs::read_to_string(sentinel).expect("read sentinel"), "built");
    assert!(paths.venv_activate().is_file());
    assert!(paths
        .spec_dir()
        .join("specs/full_stack/next_ha/stein/manifest")
        .is_file());
}

#[test]
fn local_copy_preserves_symlinks() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let specs = local_specs(dir.path());
    let dest = dir.path().join("copy");

    copy_tree(&specs, &dest).expect("copy tree");

    let link = dest.join("specs/full_stack/next_ha/stein/mojo_os_utils.py");
    let meta = fs::symlink_metadata(&link).expect("inspect copied link");
    assert!(meta.file_type().is_symlink());
    assert_eq!(
        fs::read_link(&link).expect("read copied link"),
        PathBuf::from("../../../../helper/utils/mojo_os_utils.py")
    );
    assert_eq!(fs::read_to_string(link).expect("follow link"), "# utils\n");

    let dangling = dest.join("dangling");
    assert!(fs::symlink_metadata(dangling)
        .expect("inspect dangling link")
        .file_type()
        .is_symlink());
}

#[test]
fn clone_specs_replaces_previous_copy() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let paths = GoMojoPaths::new(dir.path().join("go-mojo"));
    let stale = paths.spec_dir().join("stale.txt");
    write_file(&stale, "old");
    let specs = local_specs(dir.path());

    clone_specs(&paths, Some(&specs)).expect("copy specs");
    assert!(!stale.exists(), "previous copy must be removed");
    assert!(paths.spec_dir().join("helper/utils/mojo_os_utils.py").is_file());

    clone_specs(&paths, Some(&specs)).expect("copy specs again");
    assert!(paths.spec_dir().join("helper/utils/mojo_os_utils.py").is_file());
}

#[test]
fn clone_specs_rejects_missing_local_dir() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let paths = GoMojoPaths::new(dir.path().join("go-mojo"));
    let err = clone_specs(&paths, Some(&dir.path().join("nope"))).expect_err("missing dir");
    assert!(err.to_string().contains("not a directory"));
}

#[test]
fn bad_local_dir_keeps_existing_specs() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let paths = GoMojoPaths::new(dir.path().join("go-mojo"));
    let manifest = paths.spec_dir().join("specs/dev/basic/manifest");
    write_file(&manifest, "verify\n");
    let not_a_dir = dir.path().join("specs.tar");
    write_file(&not_a_dir, "archive");

    clone_specs(&paths, Some(&not_a_dir)).expect_err("file is not a spec dir");

    assert_eq!(fs::read_to_string(manifest).expect("read manifest"), "verify\n");
}

#[test]
fn activate_link_points_at_clients_venv() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let paths = GoMojoPaths::new(dir.path().join("go-mojo"));
    write_file(&paths.clients_activate(), "# activate\n");

    link_activate(&paths).expect("link activate");

    let meta = fs::symlink_metadata(paths.venv_activate()).expect("inspect activate");
    assert!(meta.file_type().is_symlink());
    assert_eq!(
        fs::read_link(paths.venv_activate()).expect("read activate link"),
        paths.clients_activate()
    );
}
