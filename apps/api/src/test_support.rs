//! Fakes and fixtures shared by unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::config::Config;
use crate::llm_client::{CompletionBackend, LlmError, OutputShape};
use crate::state::AppState;

enum Reply {
    Text(String),
    Fail { status: u16, message: String },
    Panic(String),
}

/// Fake completion backend: returns a canned reply and records every prompt.
pub struct FakeBackend {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Reply::Text(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            reply: Reply::Fail {
                status,
                message: message.to_string(),
            },
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn panicking(message: &str) -> Self {
        Self {
            reply: Reply::Panic(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for FakeBackend {
    async fn complete(&self, prompt: &str, shape: OutputShape) -> Result<String, LlmError> {
        assert_eq!(shape, OutputShape::StringArray);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail { status, message } => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
            Reply::Panic(message) => panic!("{message}"),
        }
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "GEMINI_API_KEY" => Some("test-key".to_string()),
        "MAX_UPLOAD_BYTES" => Some((1024 * 1024).to_string()),
        _ => None,
    })
    .unwrap()
}

pub fn test_state(backend: Arc<FakeBackend>) -> AppState {
    AppState {
        config: test_config(),
        llm: backend,
    }
}

/// Builds a PDF with one page per entry. An empty entry yields a page with an
/// empty content stream, like a scanned page.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let font_id = doc.add_object(helvetica());
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });
    let contents = pages
        .iter()
        .map(|text| {
            if text.is_empty() {
                Vec::new()
            } else {
                show_text(text)
            }
        })
        .collect();
    assemble(doc, resources_id, contents)
}

/// Single-page PDF whose font declares the given `/Encoding` name.
pub fn pdf_with_font_encoding(encoding: &str, text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let mut font = helvetica();
    font.set("Encoding", Object::Name(encoding.as_bytes().to_vec()));
    let font_id = doc.add_object(font);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });
    assemble(doc, resources_id, vec![show_text(text)])
}

/// Single-page PDF whose page content only paints a form XObject; the text
/// lives inside the form's own content stream.
pub fn pdf_with_form_xobject(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let font_id = doc.add_object(helvetica());
    let fonts = dictionary! {
        "F1" => font_id,
    };
    let form_content = Content {
        operations: show_text(text),
    };
    let form_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => media_box(),
            "Resources" => dictionary! {
                "Font" => fonts.clone(),
            },
        },
        form_content.encode().unwrap(),
    ));
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
        "XObject" => dictionary! {
            "Fm1" => form_id,
        },
    });
    let paint_form = vec![
        Operation::new("q", vec![]),
        Operation::new("Do", vec![Object::Name(b"Fm1".to_vec())]),
        Operation::new("Q", vec![]),
    ];
    assemble(doc, resources_id, vec![paint_form])
}

fn helvetica() -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    }
}

fn media_box() -> Vec<Object> {
    vec![0.into(), 0.into(), 612.into(), 792.into()]
}

fn show_text(text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

/// Wires one page per content stream under a single page tree and serializes.
fn assemble(mut doc: Document, resources_id: ObjectId, contents: Vec<Vec<Operation>>) -> Vec<u8> {
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::new();
    for operations in contents {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => media_box(),
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

pub const BOUNDARY: &str = "X-RESUME-SKILLS-BOUNDARY";

/// One part of a hand-built multipart body.
pub struct FormPart<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content: &'a [u8],
}

impl<'a> FormPart<'a> {
    pub fn file(name: &'a str, filename: &'a str, content: &'a [u8]) -> Self {
        Self {
            name,
            filename: Some(filename),
            content,
        }
    }

    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            filename: None,
            content: value.as_bytes(),
        }
    }
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/pdf\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
