use std::io::{self, Write};

// small indentation-tracking seam between the emitter and whatever the
// generated text lands on, so another back-end stays possible
pub struct CodeWriter<'w> {
    out: &'w mut dyn Write,
    depth: usize,
}

impl<'w> CodeWriter<'w> {
    pub fn new(out: &'w mut dyn Write) -> CodeWriter<'w> {
        CodeWriter { out, depth: 0 }
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return writeln!(self.out);
        }
        for _ in 0..self.depth {
            write!(self.out, "    ")?;
        }
        writeln!(self.out, "{}", text)
    }

    // writes the line and indents what follows
    pub fn open(&mut self, text: &str) -> io::Result<()> {
        self.line(text)?;
        self.depth += 1;
        Ok(())
    }

    // dedents, then writes the line
    pub fn close(&mut self, text: &str) -> io::Result<()> {
        if self.depth > 0 {
            self.depth -= 1;
        }
        self.line(text)
    }

    // for lines that close one block and open the next, like `} else {`
    pub fn chain(&mut self, text: &str) -> io::Result<()> {
        self.close(text)?;
        self.depth += 1;
        Ok(())
    }
}
