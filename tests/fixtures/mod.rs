//! Response bodies as sent by the agenda template service

#![allow(dead_code)]

use serde_json::{json, Value};

/// Template with two items and a rating question
pub fn agenda_template() -> Value {
    json!({
        "data": {
            "type": "agenda-templates",
            "id": "1",
            "attributes": {
                "name": "breh",
                "channel-type": "one-on-one",
                "slug": "scrum-meeting",
                "short-description": "asad",
                "long-description": "dfgfdg",
                "mascot": "",
                "background": "",
                "org-name": "",
                "org-logo": "",
                "created-at": "",
                "updated-at": ""
            },
            "relationships": {
                "meeting-rating-questions": {
                    "data": [{"type": "meeting-rating-questions", "id": "1"}]
                },
                "agenda-items": {
                    "data": [
                        {"type": "agenda-items", "id": "1"},
                        {"type": "agenda-items", "id": "2"}
                    ]
                }
            }
        },
        "included": [
            {
                "type": "agenda-items",
                "id": "1",
                "attributes": {
                    "title": "ddd",
                    "is-repeating": true,
                    "created-at": "2019-04-09 19:11:18",
                    "updated-at": "2019-04-09 19:11:18"
                }
            },
            {
                "type": "agenda-items",
                "id": "2",
                "attributes": {
                    "title": "eee",
                    "is-repeating": false,
                    "created-at": "2018-04-09 19:11:18",
                    "updated-at": "2018-04-09 19:11:18"
                }
            },
            {
                "type": "meeting-rating-questions",
                "id": "1",
                "attributes": {
                    "question": "How would you rate this meeting?",
                    "responses": [
                        {"emoji": ":smile:", "text": "Excellent"},
                        {"emoji": ":slightly_smiling_face:", "text": "Good"},
                        {"emoji": ":neutral_face:", "text": "Needs improvement"}
                    ],
                    "created-at": "2019-04-09 19:11:18",
                    "updated-at": "2019-04-09 19:11:18"
                }
            }
        ]
    })
}

/// Template without relationships or an included section
pub fn simple_agenda_template() -> Value {
    json!({
        "data": {
            "type": "agenda-templates",
            "id": "1",
            "attributes": {
                "name": "breh",
                "channel-type": "one-on-one",
                "slug": "scrum-meeting",
                "short-description": "more breh",
                "long-description": "even more breh",
                "mascot": ":pig:",
                "background": "red",
                "org-name": "breh",
                "org-logo": ":pig:",
                "created-at": "2019-04-09 19:11:18",
                "updated-at": "2019-04-09 19:11:18"
            }
        }
    })
}

/// Goal with three milestones
pub fn suggested_goal() -> Value {
    let milestone = |id: &str, body: &str, at: &str| {
        json!({
            "type": "milestone",
            "id": id,
            "attributes": {
                "body": body,
                "suggested-goal-id": "1",
                "created-at": at,
                "updated-at": at
            }
        })
    };

    json!({
        "data": {
            "type": "suggested-goal",
            "id": "1",
            "attributes": {
                "title": "Researching and Improving Customer Satisfaction",
                "description": "Listen to the customers",
                "icon": ":bird:",
                "user-id": 1,
                "created-at": "2020-10-04 20:58:08",
                "updated-at": "2020-10-04 20:58:08"
            },
            "relationships": {
                "milestones": {
                    "data": [
                        {"type": "milestone", "id": "1"},
                        {"type": "milestone", "id": "2"},
                        {"type": "milestone", "id": "3"}
                    ]
                }
            }
        },
        "included": [
            milestone("1", "get 50 customers on board", "2020-10-04 20:58:09"),
            milestone("2", "get 100 customers on board", "2020-10-04 20:58:10"),
            milestone("3", "get 200 customers on board", "2020-10-04 20:58:11")
        ]
    })
}

/// Plain JSON list returned by the items endpoint
pub fn recently_added_or_updated_items() -> Value {
    json!([
        {"id": 1, "name": "Sales Team Meeting", "type": "group", "title": "Successes and wins (5 min)"},
        {"id": 51, "name": "Sales Team Meeting", "type": "group", "title": "Test Again"},
        {"id": 52, "name": "Sales Team Meeting", "type": "group", "title": "🙋‍♀️ Personal updates yes"}
    ])
}
