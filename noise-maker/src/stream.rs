use std::io::{self, Write};

/// Writes each line followed by `\n`, returning how many were written.
pub fn write_lines<W, I, S>(out: &mut W, lines: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut written = 0;
    for line in lines {
        out.write_all(line.as_ref().as_bytes())?;
        out.write_all(b"\n")?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}
