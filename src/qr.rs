// ABOUTME: QR code generation adapter producing SVG data URLs
// ABOUTME: Implements the QrCodeGenerator port with the qrcode crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! QR image rendering for share links
//!
//! The renderer is treated as an opaque collaborator: text in, data URL out.
//! Output is an SVG wrapped in a base64 `data:` URL so clients can drop it
//! straight into an image tag.

use crate::errors::{AppError, AppResult};
use crate::repositories::QrCodeGenerator;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use qrcode::render::svg;
use qrcode::QrCode;

/// Minimum rendered dimensions in pixels
const QR_MIN_DIMENSIONS: u32 = 200;

/// QR generator rendering SVG data URLs
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgQrGenerator;

impl QrCodeGenerator for SvgQrGenerator {
    fn generate(&self, data: &str) -> AppResult<String> {
        let code = QrCode::new(data.as_bytes())
            .map_err(|e| AppError::internal(format!("Failed to encode QR code: {e}")))?;
        let image = code
            .render::<svg::Color<'_>>()
            .min_dimensions(QR_MIN_DIMENSIONS, QR_MIN_DIMENSIONS)
            .build();
        Ok(format!(
            "data:image/svg+xml;base64,{}",
            BASE64.encode(image)
        ))
    }
}
