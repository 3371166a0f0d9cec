mod common;

use common::{card_titles, Sidecar, StubServer};
use serde_json::json;
use std::sync::{Arc, Mutex};

fn start_session(sidecar: &mut Sidecar, url: &str, dni: &str, role: &str) {
    sidecar.request_ok(
        "session",
        "session.start",
        json!({ "endpoint": url, "user": { "dni": dni, "role": role } }),
    );
}

#[test]
fn grades_delete_refetches_from_server() {
    let grades = Arc::new(Mutex::new(vec![
        json!({ "_id": "1", "name": "1st" }),
        json!({ "_id": "2", "name": "2nd" }),
    ]));
    let store = grades.clone();
    let server = StubServer::start(Arc::new(move |name, vars| {
        let mut grades = store.lock().expect("grades lock");
        match name {
            "GetAllGrades" => json!({ "data": { "grades": *grades } }),
            "DeleteGrade" => {
                let id = vars["_id"].as_str().unwrap_or("");
                let pos = grades.iter().position(|g| g["_id"] == id);
                match pos {
                    Some(i) => {
                        let removed = grades.remove(i);
                        json!({ "data": { "deleteGrade": { "name": removed["name"] } } })
                    }
                    None => json!({ "errors": [{ "message": "grade not found" }] }),
                }
            }
            _ => json!({ "errors": [{ "message": "unexpected operation" }] }),
        }
    }));

    let mut sidecar = Sidecar::spawn();
    start_session(&mut sidecar, &server.url, "1", "admin");

    let opened = sidecar.request_ok("1", "screen.open", json!({ "screen": "grades" }));
    assert_eq!(opened["view"]["state"], "loading");
    let screen_id = opened["screenId"].as_str().expect("screenId").to_string();

    let view = sidecar.settled_view(&screen_id);
    assert_eq!(card_titles(&view), vec!["1st", "2nd"]);

    let prompt = sidecar.request_ok(
        "2",
        "screen.requestDelete",
        json!({ "screenId": screen_id, "recordId": "1" }),
    );
    assert_eq!(prompt["title"], "Eliminar grado");
    assert_eq!(prompt["options"], json!(["Cancelar", "OK"]));

    let answered = sidecar.request_ok(
        "3",
        "confirm.answer",
        json!({ "confirmationId": prompt["confirmationId"], "accepted": true }),
    );
    assert_eq!(answered["mutationStarted"], true);

    let view = sidecar.settled_view(&screen_id);
    assert_eq!(card_titles(&view), vec!["2nd"]);
    assert_eq!(
        server.call_names(),
        vec!["GetAllGrades", "DeleteGrade", "GetAllGrades"]
    );
    assert_eq!(grades.lock().expect("grades lock").len(), 1);

    sidecar.shutdown();
}

#[test]
fn cancelled_delete_never_reaches_the_server() {
    let server = StubServer::start(Arc::new(|name, _vars| match name {
        "GetAllTeachers" => json!({ "data": { "teachers": [
            { "_id": "t1", "name": "Ana", "lastname": "Pérez", "subjects": null }
        ]}}),
        _ => json!({ "errors": [{ "message": "unexpected operation" }] }),
    }));

    let mut sidecar = Sidecar::spawn();
    start_session(&mut sidecar, &server.url, "1", "admin");
    let opened = sidecar.request_ok("1", "screen.open", json!({ "screen": "adminTeachers" }));
    let screen_id = opened["screenId"].as_str().expect("screenId").to_string();
    let view = sidecar.settled_view(&screen_id);
    assert_eq!(card_titles(&view), vec!["Ana Pérez"]);

    let prompt = sidecar.request_ok(
        "2",
        "screen.requestDelete",
        json!({ "screenId": screen_id, "recordId": "t1" }),
    );
    let answered = sidecar.request_ok(
        "3",
        "confirm.answer",
        json!({ "confirmationId": prompt["confirmationId"], "accepted": false }),
    );
    assert_eq!(answered["mutationStarted"], false);

    let snapshot = sidecar.request_ok("4", "screen.view", json!({ "screenId": screen_id }));
    assert_eq!(card_titles(&snapshot["view"]), vec!["Ana Pérez"]);
    assert_eq!(snapshot["mutationInFlight"], false);
    assert_eq!(server.call_names(), vec!["GetAllTeachers"]);

    sidecar.shutdown();
}

#[test]
fn failed_mutation_is_reported_and_list_kept() {
    let server = StubServer::start(Arc::new(|name, _vars| match name {
        "GetAllGrades" => json!({ "data": { "grades": [{ "_id": "1", "name": "1st" }] } }),
        _ => json!({ "errors": [{ "message": "grade has courses" }] }),
    }));

    let mut sidecar = Sidecar::spawn();
    start_session(&mut sidecar, &server.url, "1", "admin");
    let opened = sidecar.request_ok("1", "screen.open", json!({ "screen": "grades" }));
    let screen_id = opened["screenId"].as_str().expect("screenId").to_string();
    sidecar.settled_view(&screen_id);

    let prompt = sidecar.request_ok(
        "2",
        "screen.requestDelete",
        json!({ "screenId": screen_id, "recordId": "1" }),
    );
    sidecar.request_ok(
        "3",
        "confirm.answer",
        json!({ "confirmationId": prompt["confirmationId"], "accepted": true }),
    );

    let event = sidecar.next_event(&screen_id);
    assert_eq!(event["event"], "mutation.failed");
    assert_eq!(event["error"]["code"], "network_or_server");

    let snapshot = sidecar.request_ok("4", "screen.view", json!({ "screenId": screen_id }));
    assert_eq!(card_titles(&snapshot["view"]), vec!["1st"]);
    assert!(snapshot["mutationError"]["message"]
        .as_str()
        .unwrap_or("")
        .contains("grade has courses"));

    sidecar.shutdown();
}

#[test]
fn teacher_profile_with_no_subjects_renders_empty_section() {
    let server = StubServer::start(Arc::new(|name, vars| {
        assert_eq!(name, "GetTeacherById");
        assert_eq!(vars, &json!({ "dni": "12345678" }));
        json!({ "data": { "teachers": [{
            "_id": "t1",
            "name": "Ana",
            "lastname": "Pérez",
            "dni": "12345678",
            "email": "ana@escuela.test",
            "address": "Calle 1",
            "subjects": []
        }]}})
    }));

    let mut sidecar = Sidecar::spawn();
    start_session(&mut sidecar, &server.url, "12345678", "teacher");
    let opened = sidecar.request_ok("1", "screen.open", json!({ "screen": "teacherProfile" }));
    let screen_id = opened["screenId"].as_str().expect("screenId").to_string();

    let view = sidecar.settled_view(&screen_id);
    assert_eq!(view["state"], "ready");
    let materias = view["nodes"]
        .as_array()
        .expect("nodes")
        .iter()
        .find(|n| n["type"] == "section" && n["title"] == "Materias")
        .cloned()
        .expect("materias section");
    assert_eq!(materias["items"], json!([]));

    sidecar.shutdown();
}

#[test]
fn unreachable_service_shows_error_view() {
    // Grab a free port, then release it so nothing is listening there.
    let url = {
        let l = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        format!("http://{}/graphql", l.local_addr().expect("addr"))
    };

    let mut sidecar = Sidecar::spawn();
    start_session(&mut sidecar, &url, "12345678", "teacher");
    let opened = sidecar.request_ok("1", "screen.open", json!({ "screen": "teacherProfile" }));
    let screen_id = opened["screenId"].as_str().expect("screenId").to_string();

    let view = sidecar.settled_view(&screen_id);
    assert_eq!(view, json!({ "state": "error", "message": "ERROR" }));

    sidecar.shutdown();
}

#[test]
fn student_saves_picked_picture() {
    let picture = Arc::new(Mutex::new(None::<String>));
    let stored = picture.clone();
    let server = StubServer::start(Arc::new(move |name, vars| {
        let mut pic = stored.lock().expect("picture lock");
        match name {
            "GetStudentById" => json!({ "data": { "students": [{
                "_id": "s1",
                "name": "Juan",
                "lastname": "Díaz",
                "dni": "40111222",
                "picture": *pic
            }]}}),
            "EditStudent" => {
                *pic = vars["picture"].as_str().map(str::to_string);
                json!({ "data": { "editStudent": { "name": "Juan" } } })
            }
            _ => json!({ "errors": [{ "message": "unexpected operation" }] }),
        }
    }));

    let mut sidecar = Sidecar::spawn();
    start_session(&mut sidecar, &server.url, "40111222", "student");
    let opened = sidecar.request_ok("1", "screen.open", json!({ "screen": "studentProfile" }));
    let screen_id = opened["screenId"].as_str().expect("screenId").to_string();
    sidecar.settled_view(&screen_id);

    let denied = sidecar.request_ok(
        "2",
        "device.imagePicked",
        json!({ "screenId": screen_id, "outcome": "permissionDenied" }),
    );
    assert_eq!(
        denied["alert"],
        "Se requiere acceso al Almacenamiento Interno"
    );

    sidecar.request_ok(
        "3",
        "device.imagePicked",
        json!({ "screenId": screen_id, "outcome": "picked", "uri": "file:///me.png" }),
    );
    sidecar.request_ok("4", "screen.savePicture", json!({ "screenId": screen_id }));

    let view = sidecar.settled_view(&screen_id);
    assert_eq!(view["nodes"][0]["type"], "avatar");
    assert_eq!(view["nodes"][0]["picture"], "file:///me.png");
    assert_eq!(picture.lock().expect("picture lock").as_deref(), Some("file:///me.png"));

    let snapshot = sidecar.request_ok("5", "screen.view", json!({ "screenId": screen_id }));
    assert!(snapshot.get("selectedImage").is_none());

    sidecar.shutdown();
}

#[test]
fn closed_screen_emits_nothing_further() {
    let server = StubServer::start(Arc::new(|_name, _vars| {
        json!({ "data": { "grades": [{ "_id": "1", "name": "1st" }] } })
    }));

    let mut sidecar = Sidecar::spawn();
    start_session(&mut sidecar, &server.url, "1", "admin");
    let first = sidecar.request_ok("1", "screen.open", json!({ "screen": "grades" }));
    let first_id = first["screenId"].as_str().expect("screenId").to_string();
    sidecar.request_ok("2", "screen.close", json!({ "screenId": first_id }));

    let second = sidecar.request_ok("3", "screen.open", json!({ "screen": "grades" }));
    let second_id = second["screenId"].as_str().expect("screenId").to_string();
    let view = sidecar.settled_view(&second_id);
    assert_eq!(card_titles(&view), vec!["1st"]);

    let health = sidecar.request_ok("4", "health", json!({}));
    assert_eq!(health["openScreens"], 1);
    let gone = sidecar.request("5", "screen.view", json!({ "screenId": first_id }));
    assert_eq!(gone["error"]["code"], "unknown_screen");

    sidecar.shutdown();
}
