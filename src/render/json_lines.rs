use crate::pipeline::views::View;
use crate::render::{RenderTarget, Renderer};
use log::warn;
use serde::Serialize;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Line<'a> {
    Ok {
        target: String,
        view: &'a View,
    },
    Error {
        target: String,
        message: &'a str,
    },
}

/// Writes one JSON object per render call to `W`.
///
/// Suitable for piping into a separate charting front end.
pub struct JsonLinesRenderer<W: Write> {
    out: Mutex<W>,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, line: &Line<'_>) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let result = serde_json::to_writer(&mut *out, line)
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(out));
        if let Err(e) = result {
            warn!("Failed to write render output: {}", e);
        }
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn render(&self, target: &RenderTarget, view: &View) {
        self.write(&Line::Ok {
            target: target.element_id(),
            view,
        });
    }

    fn render_error(&self, target: &RenderTarget, message: &str) {
        self.write(&Line::Error {
            target: target.element_id(),
            message,
        });
    }
}
