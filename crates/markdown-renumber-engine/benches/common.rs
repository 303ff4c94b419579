// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\nParagraph with some content.\n\n1. First\n1. Second\n\t1. Nested\n\t1. Nested again\n1. Third\n\n";
    base.repeat(size)
}

/// One long list with every item numbered `1.`, so every line but the first
/// needs an edit.
#[allow(dead_code)]
pub fn generate_flat_list(items: usize) -> String {
    let mut content = String::new();
    for i in 0..items {
        content.push_str(&format!("1. item {i}\n"));
    }
    content
}
