use sea_orm::ActiveValue::Set;
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        feedback::{entities::Feedback, value_objects::Sentiment},
    },
    entity::feedback,
    infrastructure::{
        firestore::codec::Fields,
        local::{decode_list, encode_list},
    },
};

fn parse_sentiment(raw: &str) -> Result<Sentiment, CoreError> {
    raw.parse().map_err(|e| {
        error!("Stored feedback has {}", e);
        CoreError::InternalServerError
    })
}

impl TryFrom<feedback::Model> for Feedback {
    type Error = CoreError;

    fn try_from(model: feedback::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            sentiment: parse_sentiment(&model.sentiment)?,
            suggestions: decode_list(&model.suggestions)?,
            user_id: model.user_id,
            plan_date: model.plan_date,
            text: model.text,
            adherence_score: model.adherence_score,
            created_at: model.created_at.to_utc(),
        })
    }
}

impl From<&Feedback> for feedback::ActiveModel {
    fn from(item: &Feedback) -> Self {
        Self {
            id: Set(item.document_id()),
            user_id: Set(item.user_id.clone()),
            plan_date: Set(item.plan_date),
            text: Set(item.text.clone()),
            adherence_score: Set(item.adherence_score),
            sentiment: Set(item.sentiment.as_str().to_string()),
            suggestions: Set(encode_list(&item.suggestions)),
            created_at: Set(item.created_at.fixed_offset()),
        }
    }
}

pub fn feedback_to_fields(item: &Feedback) -> Fields {
    Fields::new()
        .string("user_id", &item.user_id)
        .date("plan_date", item.plan_date)
        .string("text", &item.text)
        .double("adherence_score", item.adherence_score)
        .string("sentiment", item.sentiment.as_str())
        .strings("suggestions", &item.suggestions)
        .timestamp("created_at", item.created_at)
}

pub fn feedback_from_fields(fields: &Fields) -> Result<Feedback, CoreError> {
    Ok(Feedback {
        user_id: fields.get_string("user_id")?,
        plan_date: fields.get_date("plan_date")?,
        text: fields.get_string("text")?,
        adherence_score: fields.get_f64("adherence_score")?,
        sentiment: parse_sentiment(&fields.get_string("sentiment")?)?,
        suggestions: fields.get_strings("suggestions")?,
        created_at: fields.get_timestamp("created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::feedback::scorer;

    #[test]
    fn feedback_survives_document_encoding() {
        let text = "Loved the dinner but felt hungry";
        let item = Feedback::new(
            "u-9".to_string(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            text.to_string(),
            &scorer::analyze(text),
        );

        let fields = feedback_to_fields(&item);
        let json = serde_json::to_string(&fields).unwrap();
        let decoded: Fields = serde_json::from_str(&json).unwrap();

        assert_eq!(feedback_from_fields(&decoded).unwrap(), item);
    }
}
