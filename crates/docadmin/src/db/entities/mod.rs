//! Database entities.
//!
//! One module per `admin_*` table plus `ocr_nlp_result`. Foreign keys to
//! `admin_user` are nulled when the user is deleted; rows scoped to a
//! document, task, business or template are deleted with their parent.

/// Stamps `$created` on insert and `$updated` on every save.
macro_rules! timestamped_behavior {
    ($created:ident, $updated:ident) => {
        #[async_trait::async_trait]
        impl sea_orm::ActiveModelBehavior for ActiveModel {
            async fn before_save<C>(
                mut self,
                _db: &C,
                insert: bool,
            ) -> Result<Self, sea_orm::DbErr>
            where
                C: sea_orm::ConnectionTrait,
            {
                let now = chrono::Utc::now();
                if insert && self.$created.is_not_set() {
                    self.$created = sea_orm::ActiveValue::Set(Some(now));
                }
                self.$updated = sea_orm::ActiveValue::Set(Some(now));
                Ok(self)
            }
        }
    };
}

pub mod business;
pub mod category;
pub mod doc_sample;
pub mod document;
pub mod document_by_task;
pub mod item;
pub mod item_by_task;
pub mod item_type;
pub mod keyword;
pub mod keyword_by_task;
pub mod meta;
pub mod ocr_nlp_result;
pub mod spell_check_dict;
pub mod task;
pub mod template;
pub mod template_page;
pub mod user;

pub use business::Entity as Business;
pub use category::Entity as Category;
pub use doc_sample::Entity as DocSample;
pub use document::Entity as Document;
pub use document_by_task::Entity as DocumentByTask;
pub use item::Entity as Item;
pub use item_by_task::Entity as ItemByTask;
pub use item_type::Entity as ItemType;
pub use keyword::Entity as Keyword;
pub use keyword_by_task::Entity as KeywordByTask;
pub use meta::Entity as Meta;
pub use ocr_nlp_result::Entity as OcrNlpResult;
pub use spell_check_dict::Entity as SpellCheckDict;
pub use task::Entity as Task;
pub use template::Entity as Template;
pub use template_page::Entity as TemplatePage;
pub use user::Entity as User;

/// Decodes a JSON-array text column, tolerating the legacy double-encoded
/// form (`"[]"` stored as a JSON string) and treating garbage as empty.
pub(crate) fn decode_json_list<T>(raw: &str) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
{
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::String(inner)) => serde_json::from_str(&inner).unwrap_or_default(),
        Ok(value) => serde_json::from_value(value).unwrap_or_default(),
        Err(_) => Vec::new(),
    }
}
