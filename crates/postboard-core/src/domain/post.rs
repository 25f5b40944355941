use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::FieldErrors;

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const NOT_A_STRING: &str = "Not a valid string.";

/// Post entity - a user-submitted item with a name, color tag, comment,
/// optional image reference and a like flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub nome: String,
    pub imagem: Option<String>,
    pub cor: String,
    pub comentario: String,
    pub data_criacao: DateTime<Utc>,
    pub liked: bool,
}

impl Post {
    /// The mutable fields of this post as a draft.
    pub fn draft(&self) -> PostDraft {
        PostDraft {
            nome: self.nome.clone(),
            imagem: self.imagem.clone(),
            cor: self.cor.clone(),
            comentario: self.comentario.clone(),
        }
    }

    /// Overwrite the mutable fields. `id`, `data_criacao` and `liked` are untouched.
    pub fn apply(&mut self, draft: PostDraft) {
        self.nome = draft.nome;
        self.imagem = draft.imagem;
        self.cor = draft.cor;
        self.comentario = draft.comentario;
    }

    /// Invert the like flag and return the new value.
    pub fn toggle_like(&mut self) -> bool {
        self.liked = !self.liked;
        self.liked
    }
}

/// Field schema for the mutable part of a post.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct PostDraft {
    #[validate(length(min = 1, max = 50))]
    pub nome: String,
    #[validate(length(max = 100))]
    pub imagem: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub cor: String,
    #[validate(length(min = 1))]
    pub comentario: String,
}

impl PostDraft {
    /// Build a draft for a new post. `nome`, `cor` and `comentario` must be supplied.
    pub fn from_changes(changes: PostChanges) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let nome = required(&mut errors, "nome", changes.nome);
        let cor = required(&mut errors, "cor", changes.cor);
        let comentario = required(&mut errors, "comentario", changes.comentario);

        let draft = Self {
            nome: nome.unwrap_or_default(),
            imagem: optional(&mut errors, "imagem", changes.imagem).flatten(),
            cor: cor.unwrap_or_default(),
            comentario: comentario.unwrap_or_default(),
        };

        // Length checks only for fields that were actually supplied.
        if let Err(field_errors) = draft.check() {
            for field in ["nome", "imagem", "cor", "comentario"] {
                if errors.get(field).is_none() {
                    if let Some(messages) = field_errors.get(field) {
                        for message in messages {
                            errors.add(field, message.clone());
                        }
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(draft)
        } else {
            Err(errors)
        }
    }

    /// Merge the supplied fields over this draft, leaving absent ones unchanged.
    pub fn merge(mut self, changes: PostChanges) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        if let Some(nome) = not_null(&mut errors, "nome", changes.nome) {
            self.nome = nome;
        }
        if let Some(imagem) = optional(&mut errors, "imagem", changes.imagem) {
            self.imagem = imagem;
        }
        if let Some(cor) = not_null(&mut errors, "cor", changes.cor) {
            self.cor = cor;
        }
        if let Some(comentario) = not_null(&mut errors, "comentario", changes.comentario) {
            self.comentario = comentario;
        }

        if let Err(field_errors) = self.check() {
            errors.extend(field_errors);
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(errors)
        }
    }

    /// Run the schema constraints and render any failures as field messages.
    pub fn check(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(|e| render_errors(&e))
    }
}

/// A value supplied for a text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Null,
    Text(String),
    /// Supplied with a type that has no text form (boolean, list, object).
    Invalid,
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// A set of supplied field values. `None` means the field was not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub nome: Option<FieldValue>,
    pub imagem: Option<FieldValue>,
    pub cor: Option<FieldValue>,
    pub comentario: Option<FieldValue>,
}

/// A validated post waiting for its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub fields: PostDraft,
    pub data_criacao: DateTime<Utc>,
    pub liked: bool,
}

impl NewPost {
    /// Stamp the creation time; new posts always start unliked.
    pub fn new(fields: PostDraft) -> Self {
        Self {
            fields,
            data_criacao: Utc::now(),
            liked: false,
        }
    }

    pub fn into_post(self, id: i64) -> Post {
        Post {
            id,
            nome: self.fields.nome,
            imagem: self.fields.imagem,
            cor: self.fields.cor,
            comentario: self.fields.comentario,
            data_criacao: self.data_criacao,
            liked: self.liked,
        }
    }
}

fn required(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<FieldValue>,
) -> Option<String> {
    if value.is_none() {
        errors.add(field, REQUIRED);
        return None;
    }
    not_null(errors, field, value)
}

fn not_null(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<FieldValue>,
) -> Option<String> {
    match value? {
        FieldValue::Text(text) => Some(text.trim().to_string()),
        FieldValue::Null => {
            errors.add(field, NOT_NULL);
            None
        }
        FieldValue::Invalid => {
            errors.add(field, NOT_A_STRING);
            None
        }
    }
}

/// Nullable field: `Some(None)` clears it, an empty string counts as `null`.
fn optional(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<FieldValue>,
) -> Option<Option<String>> {
    match value? {
        FieldValue::Text(text) => Some(normalize_optional(text)),
        FieldValue::Null => Some(None),
        FieldValue::Invalid => {
            errors.add(field, NOT_A_STRING);
            None
        }
    }
}

fn normalize_optional(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn render_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors.iter() {
            out.add(field.to_string(), render_error(error));
        }
    }
    out
}

fn render_error(error: &ValidationError) -> String {
    if error.code == "length" {
        let len = error
            .params
            .get("value")
            .and_then(|v| v.as_str())
            .map(|s| s.chars().count() as u64);
        let min = error.params.get("min").and_then(|v| v.as_u64());
        let max = error.params.get("max").and_then(|v| v.as_u64());

        if let (Some(len), Some(min)) = (len, min) {
            if len < min {
                return NOT_BLANK.to_string();
            }
        }
        if let Some(max) = max {
            return format!("Ensure this field has no more than {max} characters.");
        }
    }

    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("Invalid value ({}).", error.code))
}
