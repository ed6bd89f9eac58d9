//! ASL text assembly.
//!
//! Templates carry `{{slot}}` placeholders that are filled in a single pass, so
//! a substituted value is never rescanned for further placeholders.

use crate::error::TemplateError;

/// A block of ASL text with named slots.
#[derive(Debug, Clone)]
pub struct Template<'a> {
    text: &'a str,
    slots: Vec<(&'a str, String)>,
}

impl<'a> Template<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, slots: Vec::new() }
    }

    pub fn slot(mut self, name: &'a str, value: impl Into<String>) -> Self {
        self.slots.push((name, value.into()));
        self
    }

    pub fn render(&self) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text;
        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let close = after.find("}}").ok_or(TemplateError::UnterminatedSlot)?;
            let name = after[..close].trim();
            let value = self
                .slots
                .iter()
                .find(|(slot, _)| *slot == name)
                .map(|(_, value)| value.as_str())
                .ok_or_else(|| TemplateError::MissingSlot(name.to_string()))?;
            out.push_str(value);
            rest = &after[close + 2..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// Object type named in an `External` declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalKind {
    Device,
    Method,
    Processor,
    Int,
}

impl ExternalKind {
    fn as_asl(self) -> &'static str {
        match self {
            ExternalKind::Device => "DeviceObj",
            ExternalKind::Method => "MethodObj",
            ExternalKind::Processor => "ProcessorObj",
            ExternalKind::Int => "IntObj",
        }
    }
}

/// Builder for a complete `DefinitionBlock`.
#[derive(Debug, Clone)]
pub struct SsdtBuilder {
    table_id: String,
    revision: u32,
    header: Vec<String>,
    externals: Vec<(String, ExternalKind)>,
    blocks: Vec<String>,
}

impl SsdtBuilder {
    pub const OEM_ID: &'static str = "CORP";

    pub fn new(table_id: impl Into<String>, revision: u32) -> Self {
        Self {
            table_id: table_id.into(),
            revision,
            header: Vec::new(),
            externals: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Add a `//` comment line above the definition block.
    pub fn comment(mut self, line: impl Into<String>) -> Self {
        self.header.push(line.into());
        self
    }

    /// Declare an external object once; repeats are ignored.
    pub fn external(&mut self, path: impl Into<String>, kind: ExternalKind) -> &mut Self {
        let path = path.into();
        if !self.externals.iter().any(|(p, _)| *p == path) {
            self.externals.push((path, kind));
        }
        self
    }

    pub fn block(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(text.into());
        self
    }

    /// Render `template` and append it as a block.
    pub fn template(&mut self, template: &Template<'_>) -> Result<&mut Self, TemplateError> {
        let text = template.render()?;
        self.blocks.push(text);
        Ok(self)
    }

    pub fn build(&self) -> String {
        let mut out = String::new();
        if !self.header.is_empty() {
            out.push_str("//\n");
            for line in &self.header {
                out.push_str("// ");
                out.push_str(line);
                out.push('\n');
            }
            out.push_str("//\n");
        }
        out.push_str(&format!(
            "DefinitionBlock (\"\", \"SSDT\", 2, \"{}\", \"{}\", 0x{:08X})\n{{\n",
            Self::OEM_ID,
            self.table_id,
            self.revision
        ));
        for (path, kind) in &self.externals {
            out.push_str(&format!("    External ({}, {})\n", path, kind.as_asl()));
        }
        for block in &self.blocks {
            out.push('\n');
            for line in block.trim_matches('\n').lines() {
                if line.is_empty() {
                    out.push('\n');
                } else {
                    out.push_str("    ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
        out.push_str("}\n");
        out
    }
}
