use crate::config::ParaStructure;
use std::path::Path;

/// Renders the expected layout of `base` as a text tree, one block per
/// directory in definition order, each with its `README.md` leaf.
///
/// Pure function: it never touches the filesystem, so it can preview a
/// structure that does not exist yet, or confirm one that was just built.
/// Two calls with the same inputs produce byte-identical output.
pub fn render_tree(base: &Path, structure: &ParaStructure) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}/\n", base.display()));
    out.push_str("│\n");

    let count = structure.directories.len();
    for (index, directory) in structure.directories.iter().enumerate() {
        let is_last = index + 1 == count;

        if is_last {
            // Terminal glyphs: the tree ends here, no trailing connector.
            out.push_str(&format!("└── {}/\n", directory.name));
            out.push_str("    └── README.md\n");
        } else {
            out.push_str(&format!("├── {}/\n", directory.name));
            out.push_str("│   └── README.md\n");
            out.push_str("│\n");
        }
    }

    out
}
