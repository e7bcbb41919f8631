//! Public request/response DTOs for the HTTP endpoints (serde ready).
//! Field names follow the original client contract; keep this small and
//! stable to evolve backend and frontend independently.

use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /api/v1/problem`.
#[derive(Debug, Deserialize)]
pub struct ProblemIn {
    /// Absent means "default to medium". An explicit `null` is kept
    /// distinct so it can be rejected like any other out-of-set value.
    #[serde(default, deserialize_with = "some_or_null")]
    pub difficulty: Option<Option<String>>,
}

fn some_or_null<'de, D>(d: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(d).map(Some)
}

#[derive(Debug, Serialize)]
pub struct ProblemOut {
    pub success: bool,
    pub problem: PublicProblem,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Problem fields exposed to the client.
#[derive(Debug, Serialize)]
pub struct PublicProblem {
    pub problem_text: String,
    pub final_answer: f64,
}

/// Body of `POST /api/v1/answer`.
#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "userAnswer")]
    pub user_answer: f64,
}

#[derive(Debug, Serialize)]
pub struct AnswerOut {
    pub success: bool,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
    pub feedback: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_and_null_difficulty_stay_distinct() {
        let absent: ProblemIn = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.difficulty, None);

        let null: ProblemIn = serde_json::from_value(json!({ "difficulty": null })).unwrap();
        assert_eq!(null.difficulty, Some(None));

        let given: ProblemIn =
            serde_json::from_value(json!({ "difficulty": "hard" })).unwrap();
        assert_eq!(given.difficulty, Some(Some("hard".into())));
    }

    #[test]
    fn answer_in_uses_camel_case_names() {
        let body: AnswerIn =
            serde_json::from_value(json!({ "sessionId": "s1", "userAnswer": 28.0 })).unwrap();
        assert_eq!(body.session_id, "s1");
        assert_eq!(body.user_answer, 28.0);
    }

    #[test]
    fn responses_match_the_client_contract() {
        let out = ProblemOut {
            success: true,
            problem: PublicProblem {
                problem_text: "2+2?".into(),
                final_answer: 4.0,
            },
            session_id: "s1".into(),
        };
        let v = serde_json::to_value(&out).unwrap();
        assert_eq!(v["success"], true);
        assert_eq!(v["problem"]["problem_text"], "2+2?");
        assert_eq!(v["problem"]["final_answer"], 4.0);
        assert_eq!(v["sessionId"], "s1");

        let out = AnswerOut {
            success: true,
            is_correct: false,
            feedback: "Nice try!".into(),
        };
        let v = serde_json::to_value(&out).unwrap();
        assert_eq!(v["isCorrect"], false);
        assert_eq!(v["feedback"], "Nice try!");
    }
}
