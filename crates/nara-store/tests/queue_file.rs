use nara_core::enums::QueueStatus;
use nara_store::QueueFile;
use nara_store::queue::is_queued;
use pretty_assertions::assert_eq;

const QUEUE: &str = r#"[
  {
    "title": "Mangrove carbon stocks in Puttalam lagoon",
    "author": "Unknown Author",
    "publisher": "CORE",
    "publicationYear": 2022,
    "abstract": "",
    "language": "en",
    "keywords": [{"id": 31, "name": "Mangroves"}, "blue carbon"],
    "doi": null,
    "sourceUrl": "https://core.ac.uk/download/553311.pdf",
    "pdfUrl": "/srv/nara/temp/pdfs/553311.pdf",
    "category": "RPAPER",
    "source": "CORE",
    "sourceId": 553311,
    "addedAt": "2025-10-14T02:00:05.123Z",
    "status": "uploaded",
    "storagePath": "pdfs/RPAPER/553311.pdf",
    "url": "https://firebasestorage.googleapis.com/v0/b/b/o/pdfs%2FRPAPER%2F553311.pdf?alt=media",
    "uploadedAt": "2025-10-14T02:03:40.000Z"
  },
  {
    "title": "Sea cucumber aquaculture",
    "author": "Silva, K.",
    "publisher": "CORE",
    "publicationYear": 2023,
    "abstract": "Hatchery trials.",
    "language": "en",
    "keywords": [],
    "doi": "10.1000/sc.2023",
    "sourceUrl": "https://core.ac.uk/download/600100.pdf",
    "pdfUrl": "/srv/nara/temp/pdfs/600100.pdf",
    "category": "RBOOK",
    "source": "CORE",
    "sourceId": 600100,
    "addedAt": "2025-10-15T02:00:09.000Z",
    "status": "pending"
  }
]"#;

#[test]
fn existing_queue_with_numeric_ids_loads_and_rewrites_as_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("queue/upload_queue.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, QUEUE).unwrap();
    let file = QueueFile::new(&path);

    let queue = file.load().unwrap();

    assert_eq!(queue.len(), 2);
    assert_eq!(queue[0].source_id, "553311");
    assert_eq!(queue[0].status, QueueStatus::Uploaded);
    assert_eq!(queue[0].metadata.keywords, vec!["Mangroves", "blue carbon"]);
    assert!(queue[1].is_pending());
    assert!(is_queued(&queue, "CORE", "600100"));

    file.save(&queue).unwrap();
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw[1]["sourceId"], "600100");
    assert_eq!(file.load().unwrap(), queue);
}
