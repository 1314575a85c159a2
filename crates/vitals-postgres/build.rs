#![forbid(unsafe_code)]

/// `embed_migrations!` is a proc-macro and cannot track the files it embeds,
/// so the crate has to be rebuilt whenever the migration directory changes.
fn main() {
    println!("cargo:rerun-if-changed=./migrations");
}
