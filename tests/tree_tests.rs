use mdbrowse::core::{FolderTreeOptions, LocalFs, generate_folder_tree, truncate_name};
use std::fs::{self, File};
use tempfile::tempdir;

#[tokio::test]
async fn test_tree_of_real_directory() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("docs/drafts"))?;
    File::create(dir.path().join("docs/intro.md"))?;
    File::create(dir.path().join("docs/drafts/deep.md"))?;
    File::create(dir.path().join("README.md"))?;

    let tree = generate_folder_tree(&LocalFs, dir.path(), FolderTreeOptions::default()).await;
    let lines: Vec<&str> = tree.markdown().lines().collect();

    assert_eq!(
        lines,
        vec![
            "```text",
            "[📁 2 • 📄 2]",
            "├── 📁 docs",
            "│   ├── 📁 drafts",
            "│   └── 📄 intro.md",
            "└── 📄 README.md",
            "```",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_max_depth_one_has_no_grandchildren() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("a/b"))?;
    File::create(dir.path().join("a/b/c.txt"))?;

    let options = FolderTreeOptions {
        max_depth: 1,
        ..Default::default()
    };
    let tree = generate_folder_tree(&LocalFs, dir.path(), options).await;

    assert_eq!((tree.dirs(), tree.files()), (1, 0));
    assert!(!tree.markdown().contains("b"));
    Ok(())
}

#[tokio::test]
async fn test_node_budget_with_three_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    for name in ["one.txt", "two.txt", "three.txt"] {
        File::create(dir.path().join(name))?;
    }

    let options = FolderTreeOptions {
        max_nodes: 2,
        ..Default::default()
    };
    let tree = generate_folder_tree(&LocalFs, dir.path(), options).await;

    assert_eq!(tree.truncated(), 1);
    assert_eq!(tree.files(), 2);
    let lines: Vec<&str> = tree.markdown().lines().collect();
    assert_eq!(lines.len(), 5, "unexpected tree: {:?}", lines);
    assert!(lines[1].ends_with("• … 1 more]"));
    Ok(())
}

#[tokio::test]
async fn test_dotfile_only_directory() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join(".hidden"))?;
    fs::create_dir(dir.path().join(".git"))?;

    let tree = generate_folder_tree(&LocalFs, dir.path(), FolderTreeOptions::default()).await;
    assert_eq!(tree.markdown(), "```text\n[📁 0 • 📄 0]\n```");

    let options = FolderTreeOptions {
        skip_dotfiles: false,
        ..Default::default()
    };
    let shown = generate_folder_tree(&LocalFs, dir.path(), options).await;
    assert_eq!((shown.dirs(), shown.files()), (1, 1));
    Ok(())
}

#[tokio::test]
async fn test_missing_root_is_header_only() {
    let tree = generate_folder_tree(
        &LocalFs,
        std::path::Path::new("/path/does/not/exist"),
        FolderTreeOptions::default(),
    )
    .await;
    assert_eq!(tree.markdown(), "```text\n[📁 0 • 📄 0]\n```");
}

#[test]
fn test_truncate_keeps_extension() {
    let out = truncate_name("résumé_final_draft.pdf", 10);
    assert!(out.ends_with(".pdf"));
    assert_eq!(out.matches('…').count(), 1);
    assert_eq!(out.chars().count(), 10);
}
