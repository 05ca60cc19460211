use std::cell::RefCell;

use grimoire_db::*;
use grimoire_import::upload::{EMPTY_FILE, NO_FILE, NOT_CSV};
use grimoire_import::*;

#[derive(Default)]
struct RecordingProgress {
    rows: RefCell<Vec<(usize, usize)>>,
    phases: RefCell<Vec<String>>,
    completed: RefCell<Option<String>>,
}

impl ImportProgress for RecordingProgress {
    fn on_row(&self, current: usize, total: usize, _name: &str) {
        self.rows.borrow_mut().push((current, total));
    }

    fn on_phase(&self, message: &str) {
        self.phases.borrow_mut().push(message.to_string());
    }

    fn on_complete(&self, message: &str) {
        *self.completed.borrow_mut() = Some(message.to_string());
    }
}

fn upload(conn: &rusqlite::Connection, name: &str, data: &[u8]) -> UploadResponse {
    import_upload(conn, name, data, &ImportOptions::default(), None)
}

#[test]
fn rejects_missing_and_empty_files() {
    let conn = open_memory().unwrap();
    assert_eq!(upload(&conn, "sorts.csv", b""), UploadResponse::failure(NO_FILE, None));
    assert_eq!(upload(&conn, "", b"Nom\nA\n"), UploadResponse::failure(NO_FILE, None));
}

#[test]
fn rejects_other_extensions() {
    let conn = open_memory().unwrap();
    let response = upload(&conn, "sorts.xlsx", b"Nom\nA\n");
    assert_eq!(response, UploadResponse::failure(NOT_CSV, None));
    assert!(!response.is_success());
}

#[test]
fn header_only_file_is_empty() {
    let conn = open_memory().unwrap();
    let response = upload(&conn, "sorts.csv", b"Nom,Niveau,Ecole\n");
    assert_eq!(response, UploadResponse::failure(EMPTY_FILE, None));
}

#[test]
fn success_is_logged_and_reported() {
    let conn = open_memory().unwrap();
    let progress = RecordingProgress::default();
    let response = import_upload(
        &conn,
        "sorts.csv",
        "Nom,Niveau,Ecole,Classes\nSoins,1,Évocation,Clerc\nNom,Niveau,Ecole,Classes\n".as_bytes(),
        &ImportOptions::default(),
        Some(&progress),
    );

    assert!(response.is_success());
    assert_eq!(
        response.headline(),
        "Base de donnees mise a jour avec succes ! 1 sorts importes."
    );
    assert_eq!(response.details(), None);
    assert_eq!(*progress.rows.borrow(), [(1, 2), (2, 2)]);
    assert!(!progress.phases.borrow().is_empty());
    assert_eq!(progress.completed.borrow().as_deref(), Some(response.headline()));

    let logs = list_import_logs(&conn, 5).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].file_name, "sorts.csv");
    assert_eq!(logs[0].shape, "spells");
    assert_eq!(logs[0].records_imported, 1);
    assert_eq!(logs[0].row_errors, 0);
}

#[test]
fn row_errors_reach_details() {
    let conn = open_memory().unwrap();
    let mut data = String::from("name|type|details_json|sections_json\n");
    for i in 0..7 {
        data.push_str(&format!("Monstre {i}||{{}}|[]\n"));
    }
    data.push_str("Gobelin|Humanoïde|{}|[]\n");

    let response = upload(&conn, "bestiaire.csv", data.as_bytes());
    assert!(response.is_success());
    assert_eq!(
        response.headline(),
        "Bestiaire importé avec succès ! 1 monstres traités (7 erreurs d'import)."
    );
    let details = response.details().unwrap();
    assert!(details.starts_with("Exemples d'erreurs: Monstre 0: Type manquant | "));
    assert!(details.ends_with("Monstre 4: Type manquant | ..."));

    let logs = list_import_logs(&conn, 5).unwrap();
    assert_eq!(logs[0].shape, "monsters");
    assert_eq!(logs[0].row_errors, 7);
}

#[test]
fn response_json_shape() {
    let ok = UploadResponse::success("fait", None);
    assert_eq!(
        serde_json::to_value(&ok).unwrap(),
        serde_json::json!({"success": true, "message": "fait"})
    );

    let err = UploadResponse::failure("Erreur serveur", Some("disk full".to_string()));
    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        serde_json::json!({"error": "Erreur serveur", "details": "disk full"})
    );
}
