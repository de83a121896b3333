//! System clipboard backends.

pub use platform::SystemClipboard;

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
mod platform {
    use boxboard_core::clipboard::{ClipboardBackend, ClipboardError, ClipboardResult};

    /// Clipboard backed by the OS through `arboard`.
    ///
    /// The handle opens on first use, so a missing clipboard only fails the
    /// copy or paste that needed it.
    #[derive(Default)]
    pub struct SystemClipboard {
        handle: Option<arboard::Clipboard>,
    }

    impl SystemClipboard {
        pub fn new() -> Self {
            Self::default()
        }

        fn handle(&mut self) -> ClipboardResult<&mut arboard::Clipboard> {
            if self.handle.is_none() {
                let clipboard =
                    arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
                self.handle = Some(clipboard);
            }
            self.handle
                .as_mut()
                .ok_or_else(|| ClipboardError::Unavailable("no clipboard handle".to_string()))
        }

        /// Native reads are synchronous; nothing is ever pending.
        pub fn take_pending_text(&mut self) -> Option<String> {
            None
        }
    }

    impl ClipboardBackend for SystemClipboard {
        fn write_text(&mut self, text: &str) -> ClipboardResult<()> {
            self.handle()?
                .set_text(text)
                .map_err(|e| ClipboardError::Io(e.to_string()))
        }

        fn read_text(&mut self) -> ClipboardResult<String> {
            match self.handle()?.get_text() {
                Ok(text) if text.is_empty() => Err(ClipboardError::Empty),
                Ok(text) => Ok(text),
                Err(arboard::Error::ContentNotAvailable) => Err(ClipboardError::Empty),
                Err(e) => Err(ClipboardError::Io(e.to_string())),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod platform {
    use boxboard_core::clipboard::{ClipboardBackend, ClipboardError, ClipboardResult};
    use std::cell::RefCell;

    thread_local! {
        static PENDING_CLIPBOARD_TEXT: RefCell<Option<String>> = const { RefCell::new(None) };
    }

    /// Clipboard backed by the browser's async Clipboard API.
    ///
    /// Writes are fire and forget. A read starts an async request and reports
    /// [`ClipboardError::Unavailable`]; the text shows up later through
    /// [`SystemClipboard::take_pending_text`].
    #[derive(Default)]
    pub struct SystemClipboard;

    impl SystemClipboard {
        pub fn new() -> Self {
            Self
        }

        /// Text delivered by a finished read request.
        pub fn take_pending_text(&mut self) -> Option<String> {
            PENDING_CLIPBOARD_TEXT.with(|cell| cell.borrow_mut().take())
        }
    }

    async fn read_clipboard_text_async() -> Option<String> {
        let window = web_sys::window()?;
        let clipboard = window.navigator().clipboard();
        let promise = clipboard.read_text();
        wasm_bindgen_futures::JsFuture::from(promise).await.ok()?.as_string()
    }

    impl ClipboardBackend for SystemClipboard {
        fn write_text(&mut self, text: &str) -> ClipboardResult<()> {
            let window = web_sys::window().ok_or_else(|| ClipboardError::Unavailable("no window".to_string()))?;
            let promise = window.navigator().clipboard().write_text(text);
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    log::warn!("Clipboard write failed: {:?}", e);
                }
            });
            Ok(())
        }

        fn read_text(&mut self) -> ClipboardResult<String> {
            wasm_bindgen_futures::spawn_local(async {
                match read_clipboard_text_async().await {
                    Some(text) => PENDING_CLIPBOARD_TEXT.with(|cell| {
                        *cell.borrow_mut() = Some(text);
                    }),
                    None => log::warn!("Clipboard read failed"),
                }
            });
            Err(ClipboardError::Unavailable("read continues asynchronously".to_string()))
        }
    }
}

#[cfg(all(not(feature = "native"), not(target_arch = "wasm32")))]
mod platform {
    use boxboard_core::clipboard::{ClipboardBackend, ClipboardResult};
    use boxboard_core::MemoryClipboard;

    /// In-process clipboard for builds without a system clipboard.
    #[derive(Default)]
    pub struct SystemClipboard {
        inner: MemoryClipboard,
    }

    impl SystemClipboard {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn take_pending_text(&mut self) -> Option<String> {
            None
        }
    }

    impl ClipboardBackend for SystemClipboard {
        fn write_text(&mut self, text: &str) -> ClipboardResult<()> {
            self.inner.write_text(text)
        }

        fn read_text(&mut self) -> ClipboardResult<String> {
            self.inner.read_text()
        }
    }
}
