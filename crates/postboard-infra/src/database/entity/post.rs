//! Post entity for SeaORM.

use sea_orm::{NotSet, Set};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nome: String,
    #[sea_orm(nullable)]
    pub imagem: Option<String>,
    pub cor: String,
    #[sea_orm(column_type = "Text")]
    pub comentario: String,
    pub data_criacao: DateTimeWithTimeZone,
    pub liked: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for postboard_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            nome: model.nome,
            imagem: model.imagem,
            cor: model.cor,
            comentario: model.comentario,
            data_criacao: model.data_criacao.into(),
            liked: model.liked,
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel, for updates.
impl From<postboard_core::domain::Post> for ActiveModel {
    fn from(post: postboard_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            nome: Set(post.nome),
            imagem: Set(post.imagem),
            cor: Set(post.cor),
            comentario: Set(post.comentario),
            data_criacao: Set(post.data_criacao.into()),
            liked: Set(post.liked),
        }
    }
}

/// Conversion from a validated new post to an insertable ActiveModel.
/// The id is left unset so the sequence assigns it.
impl From<postboard_core::domain::NewPost> for ActiveModel {
    fn from(post: postboard_core::domain::NewPost) -> Self {
        Self {
            id: NotSet,
            nome: Set(post.fields.nome),
            imagem: Set(post.fields.imagem),
            cor: Set(post.fields.cor),
            comentario: Set(post.fields.comentario),
            data_criacao: Set(post.data_criacao.into()),
            liked: Set(post.liked),
        }
    }
}
