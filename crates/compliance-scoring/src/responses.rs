//! Individual responses bucketed by traffic light for the detailed results pages

use crate::config::TrafficLightThresholds;
use crate::levels::TrafficLight;
use serde::{Deserialize, Serialize};
use shared_types::{QuestionCatalog, QuestionId, Response, ScoreExample};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponseData {
    pub number: String,
    pub category: String,
    pub subcategory: String,
    pub question_text: String,
    pub answer: String,
    pub score: u8,
    pub color: TrafficLight,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub score_examples: Vec<ScoreExample>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionResponses {
    pub red: Vec<QuestionResponseData>,
    pub orange: Vec<QuestionResponseData>,
    pub green: Vec<QuestionResponseData>,
}

impl QuestionResponses {
    pub fn bucket(&self, color: TrafficLight) -> &[QuestionResponseData] {
        match color {
            TrafficLight::Red => &self.red,
            TrafficLight::Orange => &self.orange,
            TrafficLight::Green => &self.green,
        }
    }

    pub fn len(&self) -> usize {
        self.red.len() + self.orange.len() + self.green.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bucket each response into red/orange/green, each sorted by question number
///
/// Unknown questions are skipped. An answer with no matching option gets the
/// label "Score: N" instead of failing.
pub fn classify_responses(
    responses: &[Response],
    catalog: &QuestionCatalog,
    lights: &TrafficLightThresholds,
) -> QuestionResponses {
    let mut buckets: [Vec<(&QuestionId, QuestionResponseData)>; 3] = Default::default();

    for response in responses {
        let Some(question) = catalog.get(&response.question_id) else {
            warn!(question_id = %response.question_id, "question not found for response");
            continue;
        };

        let answer = match question.option_label(response.answer) {
            Some(label) => label.to_string(),
            None => {
                warn!(
                    question_id = %question.id,
                    answer = %response.answer,
                    "no option for answer, using score label"
                );
                format!("Score: {}", response.answer)
            }
        };

        let color = lights.classify(response.answer.as_f64());
        let idx = match color {
            TrafficLight::Red => 0,
            TrafficLight::Orange => 1,
            TrafficLight::Green => 2,
        };
        buckets[idx].push((
            &question.id,
            QuestionResponseData {
                number: question.id.to_string(),
                category: question.category.clone(),
                subcategory: question.subcategory.clone(),
                question_text: question.text.clone(),
                answer,
                score: response.answer.value(),
                color,
                comment: response.comment.clone(),
                score_examples: question.score_examples.clone(),
            },
        ));
    }

    let [red, orange, green] = buckets.map(|mut bucket| {
        bucket.sort_by(|a, b| a.0.cmp(b.0));
        bucket.into_iter().map(|(_, data)| data).collect::<Vec<_>>()
    });
    QuestionResponses { red, orange, green }
}
