mod qr_roundtrip;
mod words_roundtrip;
