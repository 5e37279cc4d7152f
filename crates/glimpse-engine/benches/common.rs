// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_fragment_document(paragraphs: usize) -> String {
    let mut content = String::new();
    for i in 0..paragraphs {
        content.push_str(&format!(
            "Paragraph {i} mentions #[$x_{i}^2 + y$#] inline and escapes \\#[this#].\n"
        ));
        if i % 5 == 0 {
            content.push_str("A stray closer #] and a longer block #[\n$ sum_(k=0)^n k $\n#]\n");
        }
        content.push('\n');
    }
    content
}

#[allow(dead_code)]
pub fn generate_large_document() -> String {
    generate_fragment_document(2_000)
}
