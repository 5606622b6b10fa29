//! Minimal `multipart/form-data` encoder for the media upload request.

/// Form body under construction. Parts are written in insertion order.
#[derive(Debug)]
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::with_boundary(&format!("----vision-sense-{:016x}", rand::random::<u64>()))
    }

    pub fn with_boundary(boundary: &str) -> Self {
        Self {
            boundary: boundary.to_string(),
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.open_part();
        self.push_line(&format!("Content-Disposition: form-data; name=\"{}\"", escape(name)));
        self.push_line("");
        self.body.extend_from_slice(value.as_bytes());
        self.push_line("");
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.open_part();
        self.push_line(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"",
            escape(name),
            escape(file_name)
        ));
        self.push_line(&format!("Content-Type: {}", content_type));
        self.push_line("");
        self.body.extend_from_slice(bytes);
        self.push_line("");
        self
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Closes the form and returns `(content_type, body)`.
    pub fn finish(mut self) -> (String, Vec<u8>) {
        let closing = format!("--{}--\r\n", self.boundary);
        self.body.extend_from_slice(closing.as_bytes());
        (self.content_type(), self.body)
    }

    fn open_part(&mut self) {
        let opening = format!("--{}", self.boundary);
        self.push_line(&opening);
    }

    fn push_line(&mut self, line: &str) {
        self.body.extend_from_slice(line.as_bytes());
        self.body.extend_from_slice(b"\r\n");
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"").replace(['\r', '\n'], " ")
}
