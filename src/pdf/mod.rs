pub mod document;
pub mod outline;
pub mod toc;

pub use document::PdfDocument;

/// Decode a PDF text string: UTF-16BE when it carries a BOM, else PDFDocEncoding
/// (treated as Latin-1).
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        _ => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Encode a PDF text string: plain bytes for ASCII, UTF-16BE with BOM otherwise.
pub fn encode_pdf_string(text: &str) -> Vec<u8> {
    if text.is_ascii() {
        return text.as_bytes().to_vec();
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_stays_literal() {
        assert_eq!(encode_pdf_string("Annexure A1"), b"Annexure A1".to_vec());
        assert_eq!(decode_pdf_string(b"Annexure A1"), "Annexure A1");
    }

    #[test]
    fn test_non_ascii_uses_utf16() {
        let bytes = encode_pdf_string("Vakalath – Résumé");
        assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
        assert_eq!(decode_pdf_string(&bytes), "Vakalath – Résumé");
    }
}
