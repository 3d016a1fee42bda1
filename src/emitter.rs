// C emitter
// Accumulates the generated program in two buffers: the header (includes, the
// opening of `main` and variable declarations) and the code (statements).

use std::fs;
use std::io;
use std::path::Path;

pub struct CEmitter {
    header: String,
    code: String,
    indent: usize,
    /// True when the next `emit` starts a fresh line of code.
    line_start: bool,
}

impl Default for CEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl CEmitter {
    pub fn new() -> Self {
        CEmitter {
            header: String::new(),
            code: String::new(),
            indent: 1,
            line_start: true,
        }
    }

    pub fn emit(&mut self, s: &str) {
        if self.line_start {
            self.push_indent();
            self.line_start = false;
        }
        self.code.push_str(s);
    }

    pub fn emit_line(&mut self, s: &str) {
        self.emit(s);
        self.code.push('\n');
        self.line_start = true;
    }

    pub fn header(&mut self, s: &str) {
        self.header.push_str(s);
    }

    pub fn header_line(&mut self, s: &str) {
        self.header.push_str(s);
        self.header.push('\n');
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// The complete generated program: header followed by code.
    pub fn output(&self) -> String {
        let mut out = String::with_capacity(self.header.len() + self.code.len());
        out.push_str(&self.header);
        out.push_str(&self.code);
        out
    }

    pub fn write_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.output())
    }

    fn push_indent(&mut self) {
        for _ in 0..self.indent {
            self.code.push_str("  ");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_precedes_code_regardless_of_call_order() {
        let mut emitter = CEmitter::new();
        emitter.emit_line("x = 1;");
        emitter.header_line("float x;");
        emitter.emit_line("x = 2;");
        assert_eq!(emitter.output(), "float x;\n  x = 1;\n  x = 2;\n");
    }

    #[test]
    fn partial_emits_share_one_indented_line() {
        let mut emitter = CEmitter::new();
        emitter.emit("if(");
        emitter.emit("a > 1");
        emitter.emit_line("){");
        emitter.indent();
        emitter.emit_line("b = 2;");
        emitter.dedent();
        emitter.emit_line("}");
        assert_eq!(emitter.output(), "  if(a > 1){\n    b = 2;\n  }\n");
    }

    #[test]
    fn header_is_not_indented() {
        let mut emitter = CEmitter::new();
        emitter.header("#include ");
        emitter.header_line("<stdio.h>");
        assert_eq!(emitter.output(), "#include <stdio.h>\n");
    }

    #[test]
    fn write_file_persists_output() {
        let path = std::env::temp_dir().join(format!("teeny-c-emitter-{}.c", std::process::id()));
        let mut emitter = CEmitter::new();
        emitter.header_line("int main(void){");
        emitter.emit_line("return 0;");
        emitter.write_file(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(written, "int main(void){\n  return 0;\n");
    }
}
