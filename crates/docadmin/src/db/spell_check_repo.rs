//! Spell-check dictionary: substitution rules applied to extracted keys and
//! values after OCR.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use sea_orm::{ActiveModelTrait, ActiveValue::Set};

use super::entities::spell_check_dict;
use super::entities::SpellCheckDict;
use super::DatabaseError;
use crate::error::{DocAdminError, ValidationError};
use crate::lifecycle::KeywordType;

const MAX_KEYWORD_LEN: usize = 64;

fn check_keyword(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    if value.chars().count() > MAX_KEYWORD_LEN {
        return Err(ValidationError::new(
            field,
            format!("longer than {} characters", MAX_KEYWORD_LEN),
        ));
    }
    Ok(())
}

pub async fn add_rule<C>(
    db: &C,
    keyword_type: KeywordType,
    wrong_keyword: &str,
    correct_keyword: &str,
    user_id: Option<i32>,
) -> Result<spell_check_dict::Model, DocAdminError>
where
    C: ConnectionTrait,
{
    check_keyword("wrong_keyword", wrong_keyword)?;
    check_keyword("correct_keyword", correct_keyword)?;

    let model = spell_check_dict::ActiveModel {
        keyword_type: Set(keyword_type.into()),
        wrong_keyword: Set(Some(wrong_keyword.to_string())),
        correct_keyword: Set(Some(correct_keyword.to_string())),
        user_id: Set(user_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(DatabaseError::from)?;

    log::debug!(
        "Added {} spell-check rule '{}' -> '{}'",
        keyword_type,
        wrong_keyword,
        correct_keyword
    );
    Ok(model)
}

/// Rules that apply to `keyword_type`: its own plus the `ALL` rules.
pub async fn rules_for<C>(
    db: &C,
    keyword_type: KeywordType,
) -> Result<Vec<spell_check_dict::Model>, DatabaseError>
where
    C: ConnectionTrait,
{
    let labels = [keyword_type.as_str(), KeywordType::All.as_str()];
    Ok(SpellCheckDict::find()
        .filter(spell_check_dict::Column::KeywordType.is_in(labels))
        .order_by_asc(spell_check_dict::Column::SpellDictId)
        .all(db)
        .await?)
}

pub async fn delete_rule<C>(db: &C, spell_dict_id: i32) -> Result<u64, DatabaseError>
where
    C: ConnectionTrait,
{
    let result = SpellCheckDict::delete_by_id(spell_dict_id).exec(db).await?;
    Ok(result.rows_affected)
}

/// Rewrites `text` in a single left-to-right pass. At each position the
/// longest matching wrong keyword wins; replaced text is not rescanned.
pub fn apply_rules(rules: &[spell_check_dict::Model], text: &str) -> String {
    let mut pairs: Vec<(&str, &str)> = rules
        .iter()
        .filter_map(|rule| {
            let wrong = rule.wrong_keyword.as_deref().filter(|w| !w.is_empty())?;
            Some((wrong, rule.correct_keyword.as_deref().unwrap_or("")))
        })
        .collect();
    pairs.sort_by_key(|(wrong, _)| std::cmp::Reverse(wrong.chars().count()));

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        match pairs.iter().find(|(wrong, _)| rest.starts_with(wrong)) {
            Some((wrong, correct)) => {
                out.push_str(correct);
                rest = &rest[wrong.len()..];
            }
            None => {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }
    out
}
