#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm-bindgen start hook in lib.rs boots the app; nothing to do
    // when trunk invokes the binary shim.
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("gocard-frontend is a browser app; build it for wasm32 with trunk.");
}
