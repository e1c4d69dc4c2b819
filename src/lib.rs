pub mod ast;
pub mod error;
pub mod file;
pub mod json;
pub mod lexer;
pub mod parser;
pub mod render;

pub use ast::{Document, FloatConst, Statement};
pub use error::{LineError, LineErrorKind, LoadError};
pub use file::MaterialFile;
pub use parser::{explain, parse, parse_line, split_lines, try_parse_line};
pub use render::{render, render_with, LineEnding, RenderOptions};

// ── WASM FFI ────────────────────────────────────────────────────────

/// Allocate `len` bytes in WASM memory, returning a pointer.
/// The caller must free the returned pointer with `dealloc(ptr, len)`.
/// Returns null if `len` is not a valid allocation size.
#[no_mangle]
pub extern "C" fn alloc(len: usize) -> *mut u8 {
    match std::alloc::Layout::from_size_align(len.max(1), 1) {
        Ok(layout) => unsafe { std::alloc::alloc(layout) },
        Err(_) => std::ptr::null_mut(),
    }
}

/// Free a buffer previously returned by `alloc` or by any of the
/// `wasm_*` functions. For null-terminated strings returned by those
/// functions, pass `strlen(ptr) + 1` as `len`.
#[no_mangle]
pub unsafe extern "C" fn dealloc(ptr: *mut u8, len: usize) {
    if let Ok(layout) = std::alloc::Layout::from_size_align(len.max(1), 1) {
        unsafe { std::alloc::dealloc(ptr, layout) };
    }
}

// ── Session-based WASM FFI ──────────────────────────────────────────

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// The document a shell currently has open.
struct Session {
    document: Document,
}

// WASM is single-threaded, so thread_local is just a convenient safe wrapper.
thread_local! {
    static SESSIONS: RefCell<HashMap<u32, Session>> = RefCell::new(HashMap::new());
    static NEXT_SESSION_ID: Cell<u32> = const { Cell::new(1) };
}

fn with_sessions<R>(f: impl FnOnce(&mut HashMap<u32, Session>) -> R) -> R {
    SESSIONS.with(|s| f(&mut s.borrow_mut()))
}

fn next_id() -> u32 {
    NEXT_SESSION_ID.with(|c| {
        let id = c.get();
        c.set(id + 1);
        id
    })
}

/// Create a new session holding an empty document. Returns a session ID.
#[no_mangle]
pub extern "C" fn wasm_session_new() -> u32 {
    let id = next_id();
    with_sessions(|s| {
        s.insert(
            id,
            Session {
                document: Document::default(),
            },
        )
    });
    id
}

/// Parse material source into the session, replacing its document.
/// Returns a pointer to the null-terminated JSON view of the document,
/// or `[]` for an unknown session.
///
/// # Safety
/// `src_ptr` must point to `src_len` bytes of valid UTF-8.
#[no_mangle]
pub unsafe extern "C" fn wasm_session_load(
    id: u32,
    src_ptr: *const u8,
    src_len: usize,
) -> *const u8 {
    let input = unsafe {
        let slice = std::slice::from_raw_parts(src_ptr, src_len);
        std::str::from_utf8_unchecked(slice)
    };
    let document = parse(input);
    let json_str = with_sessions(|s| match s.get_mut(&id) {
        Some(session) => {
            let json_str = json::to_json(&document);
            session.document = document;
            json_str
        }
        None => "[]".to_string(),
    });
    string_to_c_ptr(json_str)
}

/// Render the session's document back to text.
/// Returns a pointer to a null-terminated string (empty for an unknown session).
#[no_mangle]
pub extern "C" fn wasm_session_render(id: u32) -> *const u8 {
    with_sessions(|s| match s.get(&id) {
        Some(session) => string_to_c_ptr(session.document.render()),
        None => string_to_c_ptr(String::new()),
    })
}

/// Get the JSON view of the session's document.
#[no_mangle]
pub extern "C" fn wasm_session_get_document(id: u32) -> *const u8 {
    with_sessions(|s| match s.get(&id) {
        Some(session) => string_to_c_ptr(json::to_json(&session.document)),
        None => string_to_c_ptr("[]".to_string()),
    })
}

/// Explain why lines of the session's document were kept verbatim.
/// Opaque lines render unchanged, so line numbers and columns match the
/// loaded source. Returns a pointer to a null-terminated JSON array.
#[no_mangle]
pub extern "C" fn wasm_session_explain(id: u32) -> *const u8 {
    with_sessions(|s| match s.get(&id) {
        Some(session) => {
            let errors = explain(&session.document.render());
            string_to_c_ptr(json::line_errors_to_json(&errors))
        }
        None => string_to_c_ptr("[]".to_string()),
    })
}

/// Free a session, dropping its document.
#[no_mangle]
pub extern "C" fn wasm_session_free(id: u32) {
    with_sessions(|s| s.remove(&id));
}

/// Convert a String to a null-terminated C pointer with exact allocation size.
/// The allocation size is exactly `s.len() + 1` bytes, so the caller can
/// free with `dealloc(ptr, strlen(ptr) + 1)`.
fn string_to_c_ptr(s: String) -> *const u8 {
    let mut bytes = s.into_bytes();
    bytes.push(0);
    // into_boxed_slice guarantees allocation size == bytes.len()
    let boxed = bytes.into_boxed_slice();
    Box::into_raw(boxed) as *mut u8
}
