//! Builders for parent rows used across integration tests.
//!
//! Each returns an active model with only the columns a test cares about
//! set; everything else is left to the column defaults.

#![allow(dead_code)]

use sea_orm::ActiveValue::Set;

use docadmin::db::entities::{
    business, category, doc_sample, document, document_by_task, item, item_by_task, item_type,
    keyword, keyword_by_task, meta, task,
};

pub fn business(code: &str, user_id: Option<i32>) -> business::ActiveModel {
    business::ActiveModel {
        biz_code: Set(Some(code.to_string())),
        biz_name: Set(Some(format!("{} business", code))),
        user_id: Set(user_id),
        ..Default::default()
    }
}

pub fn task(code: &str, biz_id: i32, user_id: Option<i32>) -> task::ActiveModel {
    task::ActiveModel {
        task_code: Set(Some(code.to_string())),
        task_name: Set(Some(format!("{} task", code))),
        biz_id: Set(Some(biz_id)),
        user_id: Set(user_id),
        ..Default::default()
    }
}

pub fn document(code: &str, user_id: Option<i32>) -> document::ActiveModel {
    document::ActiveModel {
        doc_code: Set(Some(code.to_string())),
        doc_name: Set(Some(format!("{} document", code))),
        extraction_target: Set(Some("KV".to_string())),
        user_id: Set(user_id),
        ..Default::default()
    }
}

pub fn document_by_task(task_id: i32, doc_id: i32) -> document_by_task::ActiveModel {
    document_by_task::ActiveModel {
        task_id: Set(Some(task_id)),
        doc_id: Set(Some(doc_id)),
        ..Default::default()
    }
}

pub fn item_type(name: &str) -> item_type::ActiveModel {
    item_type::ActiveModel {
        item_type_name: Set(Some(name.to_string())),
        ..Default::default()
    }
}

pub fn meta(name: &str, item_type_id: i32) -> meta::ActiveModel {
    meta::ActiveModel {
        meta_name: Set(Some(name.to_string())),
        item_type_id: Set(Some(item_type_id)),
        depth: Set(Some("1".to_string())),
        ..Default::default()
    }
}

pub fn item(name: &str, meta_id: i32, doc_id: i32) -> item::ActiveModel {
    item::ActiveModel {
        item_name: Set(Some(name.to_string())),
        meta_id: Set(Some(meta_id)),
        priority: Set(Some(1)),
        doc_id: Set(Some(doc_id)),
        ..Default::default()
    }
}

pub fn item_by_task(item_id: i32, task_id: i32, meta_id: i32) -> item_by_task::ActiveModel {
    item_by_task::ActiveModel {
        item_id: Set(Some(item_id)),
        task_id: Set(Some(task_id)),
        meta_id: Set(Some(meta_id)),
        priority: Set(Some(1)),
        ..Default::default()
    }
}

pub fn category(name: &str) -> category::ActiveModel {
    category::ActiveModel {
        category_name: Set(Some(name.to_string())),
        ..Default::default()
    }
}

pub fn keyword(name: &str, category_id: Option<i32>, doc_id: i32) -> keyword::ActiveModel {
    keyword::ActiveModel {
        keyword_name: Set(Some(name.to_string())),
        category_id: Set(category_id),
        doc_id: Set(Some(doc_id)),
        ..Default::default()
    }
}

pub fn keyword_by_task(keyword_id: i32, task_id: i32) -> keyword_by_task::ActiveModel {
    keyword_by_task::ActiveModel {
        keyword_id: Set(Some(keyword_id)),
        task_id: Set(Some(task_id)),
        ..Default::default()
    }
}

pub fn doc_sample(doc_id: i32) -> doc_sample::ActiveModel {
    doc_sample::ActiveModel {
        file_name: Set(Some("sample.pdf".to_string())),
        doc_titles: Set(r#"["Invoice","Receipt"]"#.to_string()),
        page_numbers: Set("[1,3]".to_string()),
        doc_id: Set(Some(doc_id)),
        ..Default::default()
    }
}
