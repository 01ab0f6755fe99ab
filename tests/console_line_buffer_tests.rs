//! Line buffer tests

use device_console::console::line_buffer::{LineBuffer, LineError, LINE_SIZE};

fn feed_all(buf: &mut LineBuffer, input: &[u8]) -> bool {
    input.iter().any(|&b| buf.feed(b))
}

#[test]
fn test_line_completes_on_cr_or_lf() {
    let mut buf = LineBuffer::new();

    assert!(!feed_all(&mut buf, b"heap"));
    assert!(buf.feed(b'\r'));
    assert_eq!(buf.text(), Ok("heap"));

    buf.clear();
    assert!(feed_all(&mut buf, b"tasks\n"));
    assert_eq!(buf.text(), Ok("tasks"));
}

#[test]
fn test_control_bytes_ignored() {
    let mut buf = LineBuffer::new();

    feed_all(&mut buf, b"st\x1b[Aat\x7fus");
    assert_eq!(buf.text(), Ok("st[Aatus"));
    assert!(!buf.overflowed());
}

#[test]
fn test_overflow_flagged_and_cleared() {
    let mut buf = LineBuffer::new();

    for _ in 0..LINE_SIZE + 5 {
        buf.feed(b'x');
    }
    assert_eq!(buf.len(), LINE_SIZE);
    assert!(buf.overflowed());
    assert_eq!(buf.text(), Err(LineError::TooLong));

    buf.clear();
    assert!(buf.is_empty());
    assert!(!buf.overflowed());
}

#[test]
fn test_utf8_text_kept_intact() {
    let mut buf = LineBuffer::new();

    assert!(feed_all(&mut buf, "settings set name café\r".as_bytes()));
    assert_eq!(buf.text(), Ok("settings set name café"));
}

#[test]
fn test_invalid_utf8_rejected() {
    let mut buf = LineBuffer::new();

    assert!(feed_all(&mut buf, b"settings set name caf\xff\n"));
    assert_eq!(buf.text(), Err(LineError::InvalidUtf8));

    buf.clear();
    feed_all(&mut buf, b"heap");
    assert_eq!(buf.text(), Ok("heap"));
}
