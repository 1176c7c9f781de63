use super::{init_mojo_root, ProjectConfig, CONTAINER_CLASS};

fn load_project(marker: &std::path::Path) -> ProjectConfig {
    serde_json::from_slice(&std::fs::read(marker).expect("read marker")).expect("parse marker")
}

#[test]
fn init_writes_marker_with_container_and_project_roots() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mojo_root = dir.path().join("mojo");

    let config = init_mojo_root(&mojo_root, "bionic").expect("init mojo root");

    let marker = mojo_root.join("openstack/bionic/.project");
    assert_eq!(config.marker_path(), marker);
    let loaded = load_project(&marker);
    assert_eq!(loaded, config);
    assert_eq!(loaded.container_class, CONTAINER_CLASS);
    assert_eq!(loaded.project_root, mojo_root.join("openstack"));
    assert_eq!(loaded.container_root, mojo_root.join("openstack/bionic"));

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(marker).expect("read marker")).expect("json");
    assert_eq!(raw["container_class"], "containerless");
}

#[test]
fn init_is_idempotent_for_existing_directory() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mojo_root = dir.path().join("mojo");
    let workspace = mojo_root.join("openstack/focal/20200101000000");
    std::fs::create_dir_all(&workspace).expect("create workspace");

    init_mojo_root(&mojo_root, "focal").expect("first init");
    init_mojo_root(&mojo_root, "focal").expect("second init");

    assert!(workspace.is_dir(), "existing workspace must survive");
    assert!(mojo_root.join("openstack/focal/.project").is_file());
}
