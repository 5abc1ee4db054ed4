// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_wiki_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **strong**, *em* and [[Cat/Page|a link]].\n\n- Bullet point\n  - Nested item\n- Another item\n\n||a||b||\n||c||d||\n\n";
    base.repeat(size)
}

/// Articles `Chain/T0`..`Chain/T{len}`, each transcluding the next.
#[allow(dead_code)]
pub fn generate_chain(len: usize) -> folio_engine::MemoryArticles {
    (0..len)
        .map(|i| {
            let article = folio_engine::ArticleRef::new("Chain", format!("T{i}"));
            let source = generate_wiki_content(2) + "{{Chain/T" + &(i + 1).to_string() + "}}";
            (article, source)
        })
        .collect()
}
