//! Request and status lines.

use std::fmt;
use std::str::FromStr;

use bytes::{BufMut, BytesMut};
use http::{Method, StatusCode, Uri, Version};

use crate::protocol::{uri, ParseError};
use crate::utils::put_head_text;

/// The two HTTP versions a raw message may declare.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVersion {
    Http10,
    #[default]
    Http11,
}

impl HttpVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVersion::Http10 => "HTTP/1.0",
            HttpVersion::Http11 => "HTTP/1.1",
        }
    }
}

impl FromStr for HttpVersion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HTTP/1.0" => Ok(HttpVersion::Http10),
            "HTTP/1.1" => Ok(HttpVersion::Http11),
            other => Err(ParseError::malformed_start_line(format!("unsupported http version {other:?}"))),
        }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpVersion> for Version {
    fn from(version: HttpVersion) -> Self {
        match version {
            HttpVersion::Http10 => Version::HTTP_10,
            HttpVersion::Http11 => Version::HTTP_11,
        }
    }
}

/// Behaviour shared by request and status lines.
pub trait StartLine: fmt::Display {
    fn version(&self) -> HttpVersion;

    /// Writes the line, terminated by CRLF.
    fn encode(&self, dst: &mut BytesMut) -> std::io::Result<()>;
}

/// How the target of a request line is written.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TargetForm {
    /// `path[?query]` of the URI.
    Origin,
    /// The whole URI, or the target text exactly as it was received.
    Absolute(Option<String>),
    /// `*`
    Asterisk,
}

/// `METHOD SP TARGET SP VERSION`
///
/// Holds the resolved absolute URI. An origin-form or authority-form target
/// is written back as `path[?query]`. A target received in absolute form is
/// written back as received, and `*` stays `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: Method,
    uri: Uri,
    version: HttpVersion,
    form: TargetForm,
}

impl RequestLine {
    pub fn new(method: Method, uri: Uri, version: HttpVersion) -> Self {
        Self { method, uri, version, form: TargetForm::Origin }
    }

    /// Marks the line to be written with its full URI as target.
    pub fn in_absolute_form(self) -> Self {
        Self { form: TargetForm::Absolute(None), ..self }
    }

    /// Marks the line to be written with `*` as target, as in
    /// `OPTIONS * HTTP/1.1`.
    pub fn in_asterisk_form(self) -> Self {
        Self { form: TargetForm::Asterisk, ..self }
    }

    /// Keeps the form of the target text the line was parsed from.
    pub(crate) fn with_received_target(self, target: &str) -> Self {
        let form = if target == "*" {
            TargetForm::Asterisk
        } else if target.contains("://") {
            TargetForm::Absolute(Some(target.to_owned()))
        } else {
            TargetForm::Origin
        };
        Self { form, ..self }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn is_absolute_form(&self) -> bool {
        matches!(self.form, TargetForm::Absolute(_))
    }

    pub fn is_asterisk_form(&self) -> bool {
        self.form == TargetForm::Asterisk
    }

    /// Copy whose URI authority is replaced by `host` (`host[:port]`). The
    /// old port is dropped even when `host` names none. An absolute target
    /// is then written from the new URI.
    pub fn with_host(&self, host: &str) -> Result<Self, ParseError> {
        let form = match self.form {
            TargetForm::Absolute(_) => TargetForm::Absolute(None),
            ref form => form.clone(),
        };
        Ok(Self { uri: uri::with_host(&self.uri, host)?, form, ..self.clone() })
    }

    fn write_target<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        match &self.form {
            TargetForm::Absolute(Some(target)) => return w.write_str(target),
            TargetForm::Absolute(None) => return write!(w, "{}", self.uri),
            TargetForm::Asterisk => return w.write_char('*'),
            TargetForm::Origin => {}
        }
        match self.uri.path() {
            "" => w.write_char('/')?,
            path => w.write_str(path)?,
        }
        if let Some(query) = self.uri.query() {
            write!(w, "?{query}")?;
        }
        Ok(())
    }
}

impl StartLine for RequestLine {
    fn version(&self) -> HttpVersion {
        self.version
    }

    fn encode(&self, dst: &mut BytesMut) -> std::io::Result<()> {
        put_head_text(dst, &self.to_string());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.method)?;
        self.write_target(f)?;
        write!(f, " {}", self.version)
    }
}

/// `VERSION SP STATUS-CODE SP REASON-PHRASE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    version: HttpVersion,
    status: StatusCode,
    reason: String,
}

impl StatusLine {
    pub fn new(version: HttpVersion, status: StatusCode, reason: impl Into<String>) -> Self {
        Self { version, status, reason: reason.into() }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Reason phrase as sent, possibly empty.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl StartLine for StatusLine {
    fn version(&self) -> HttpVersion {
        self.version
    }

    fn encode(&self, dst: &mut BytesMut) -> std::io::Result<()> {
        put_head_text(dst, &self.to_string());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.version, self.status.as_str())?;
        if !self.reason.is_empty() {
            write!(f, " {}", self.reason)?;
        }
        Ok(())
    }
}
