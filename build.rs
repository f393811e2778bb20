//! Build script to generate the embedded group pool
//!
//! Reads the group data file and generates Rust source code with a const table.

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    generate_group_table(
        "data/groups.txt",
        &Path::new(&out_dir).join("groups.rs"),
        "EMBEDDED_GROUPS",
        "Default category groups bundled with the binary",
    );

    // Rebuild if the group data changes
    println!("cargo:rerun-if-changed=data/groups.txt");
}

fn generate_group_table(input_path: &str, output_path: &Path, const_name: &str, doc_comment: &str) {
    let content = fs::read_to_string(input_path)
        .unwrap_or_else(|e| panic!("Failed to read {input_path}: {e}"));

    let rows: Vec<(&str, &str, Vec<&str>)> = content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(number, line)| {
            let fields: Vec<&str> = line.trim().split('|').collect();
            assert!(
                fields.len() == 3,
                "{input_path}:{}: expected difficulty|category|words",
                number + 1
            );
            let words: Vec<&str> = fields[2].split(',').map(str::trim).collect();
            assert!(
                words.len() == 4,
                "{input_path}:{}: expected exactly 4 words, got {}",
                number + 1,
                words.len()
            );
            (fields[0].trim(), fields[1].trim(), words)
        })
        .collect();

    let count = rows.len();

    let mut output = fs::File::create(output_path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", output_path.display()));

    writeln!(output, "// Generated group table").unwrap();
    writeln!(output, "//").unwrap();
    writeln!(output, "// {doc_comment}").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// {doc_comment}").unwrap();
    writeln!(output, "///").unwrap();
    writeln!(output, "/// Each row is `(difficulty, category, words)`.").unwrap();
    writeln!(output, "pub const {const_name}: &[(&str, &str, [&str; 4])] = &[").unwrap();

    for (difficulty, category, words) in rows {
        writeln!(
            output,
            "    ({difficulty:?}, {category:?}, [{:?}, {:?}, {:?}, {:?}]),",
            words[0], words[1], words[2], words[3]
        )
        .unwrap();
    }

    writeln!(output, "];").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// Number of rows in {const_name}").unwrap();
    writeln!(output, "pub const {const_name}_COUNT: usize = {count};").unwrap();
}
