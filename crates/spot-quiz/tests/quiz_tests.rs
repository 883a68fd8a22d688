use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use spot_domain::{OutcomeKind, ReactionTable};
use spot_quiz::{list_by_color, QuizError, QuizGenerator, QuizQuestion, QuizRequest, TutorContext};

fn chemdb() -> ReactionTable {
    ReactionTable::from_json_str(include_str!("../../../data/chemdb.json")).unwrap()
}

#[test]
fn test_pair_question_matches_table_entry() {
    let t = chemdb();
    let quiz = QuizGenerator::new(&t);
    let mut rng = StdRng::seed_from_u64(21);
    for _ in 0..50 {
        let q = quiz.generate(&QuizRequest::default(), &mut rng).unwrap();
        let QuizQuestion::PairToColor { prompt, cation, anion, expected, .. } = q else {
            panic!("default mode must be pair-to-color");
        };
        assert_eq!(prompt, format!("What happens when {cation} mixes with {anion}?"));
        let record = t.lookup(&cation, &anion).unwrap();
        assert_eq!(expected.kind, record.kind);
        if expected.kind == OutcomeKind::NoReaction {
            assert!(expected.color.is_none());
        } else {
            assert_eq!(expected.color, record.color);
        }
    }
}

#[test]
fn test_color_question_lists_every_reaction() {
    let t = chemdb();
    let quiz = QuizGenerator::new(&t);
    let mut rng = StdRng::seed_from_u64(8);
    let req = QuizRequest::from_json(&json!({"mode": "color-to-reactions"})).unwrap();
    for _ in 0..20 {
        let QuizQuestion::ColorToReactions { color, answers, .. } = quiz.generate(&req, &mut rng).unwrap() else {
            panic!("expected color-to-reactions");
        };
        let facts = list_by_color(&t, &color);
        assert_eq!(answers.len(), facts.len());
        for (answer, fact) in answers.iter().zip(&facts) {
            assert_eq!(answer, &format!("{} + {}", fact.cation, fact.anion));
        }
    }
}

#[test]
fn test_unknown_mode_is_rejected() {
    let t = chemdb();
    let mut rng = StdRng::seed_from_u64(0);
    let req = QuizRequest::from_json(&json!({"mode": "speed-round"})).unwrap();
    let err = QuizGenerator::new(&t).generate(&req, &mut rng).unwrap_err();
    assert_eq!(err, QuizError::UnknownMode("speed-round".into()));
    assert_eq!(err.status(), 400);
}

#[test]
fn test_tutor_preloads_facts_for_mentioned_color() {
    let t = chemdb();
    let ctx = TutorContext::build(&t, "Which cations give a Black precipitate?");
    assert_eq!(ctx.color, Some("black"));
    assert!(!ctx.facts.is_empty());
    assert!(ctx.facts.len() <= 40);
    assert!(ctx.facts.iter().all(|f| f.color.as_deref() == Some("black")));
}
