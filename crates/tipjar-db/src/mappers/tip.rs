//! Tip row to domain entity conversion.

use tipjar_core::entities::Tip;
use tipjar_core::value_objects::TipId;

use crate::models::TipModel;

// Infallible: every column is either NOT NULL or an Option on both sides.
impl From<TipModel> for Tip {
    fn from(model: TipModel) -> Self {
        Tip {
            id: TipId::new(model.id),
            author: model.author,
            handle: model.handle,
            body: model.body,
            likes: model.likes,
            dislikes: model.dislikes,
            created_at: model.created_at,
        }
    }
}

/// Borrowed view of a [`Tip`] in bind-ready form.
pub struct TipInsert<'a> {
    pub id: i64,
    pub author: &'a str,
    pub handle: Option<&'a str>,
    pub body: &'a str,
}

impl<'a> TipInsert<'a> {
    pub fn new(tip: &'a Tip) -> Self {
        Self {
            id: tip.id.into_inner(),
            author: &tip.author,
            handle: tip.handle.as_deref(),
            body: &tip.body,
        }
    }
}
