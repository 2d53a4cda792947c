use super::*;

#[test]
fn test_create_then_list() {
    let dir = TempDir::new().unwrap();
    let mut service = open_service(&dir, "laptop");

    let id = service.create_tag("Work", "#e53935", None).unwrap();

    let tags = service.get_tags();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].id, id);
    assert_eq!(tags[0].name, "Work");
    assert_eq!(tags[0].color, "#e53935");
    assert_eq!(tags[0].order, 0);
    assert_eq!(tags[0].created_at, tags[0].updated_at);
}

#[test]
fn test_create_appends_to_own_log_only() {
    let dir = TempDir::new().unwrap();
    let mut service = open_service(&dir, "laptop");

    service.create_tag("Work", "#e53935", None).unwrap();
    service.create_tag("Home", "#43a047", None).unwrap();

    let log = local_log(dir.path(), "laptop");
    assert_eq!(log.host, "laptop");
    assert_eq!(log.tag_log.len(), 2);
    assert_eq!(log.tag_log[0].seq, 1);
    assert_eq!(log.tag_log[1].seq, 2);
    assert!(log.tag_log[0].timestamp <= log.tag_log[1].timestamp);
    assert!(log.tag_log.iter().all(|e| e.hostname == "laptop"));

    let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(files.len(), 1);
}

#[test]
fn test_default_order_follows_tag_count() {
    let dir = TempDir::new().unwrap();
    let mut service = open_service(&dir, "laptop");

    service.create_tag("A", "#e53935", None).unwrap();
    service.create_tag("B", "#e53935", None).unwrap();
    service.create_tag("Z", "#e53935", Some(-1)).unwrap();

    let tags = service.get_tags();
    assert_eq!(tag_names(&tags), vec!["Z", "A", "B"]);
    assert_eq!(tags[2].order, 1);
}

#[test]
fn test_partial_update_keeps_other_fields() {
    let dir = TempDir::new().unwrap();
    let mut service = open_service(&dir, "laptop");
    let id = service.create_tag("Idea", "#fdd835", None).unwrap();
    let before = service.get_tags()[0].clone();

    service.update_tag(&id, TagUpdate::name("Ideas")).unwrap();

    let after = &service.get_tags()[0];
    assert_eq!(after.name, "Ideas");
    assert_eq!(after.color, "#fdd835");
    assert_eq!(after.order, before.order);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= before.updated_at);
}

#[test]
fn test_delete_removes_tag_and_its_assignments() {
    let dir = TempDir::new().unwrap();
    let mut service = open_service(&dir, "laptop");
    let work = service.create_tag("Work", "#e53935", None).unwrap();
    let home = service.create_tag("Home", "#43a047", None).unwrap();
    service.add_file_tag("notes/a.md", &work).unwrap();
    service.add_file_tag("notes/a.md", &home).unwrap();

    service.delete_tag(&work).unwrap();

    assert_eq!(tag_names(&service.get_tags()), vec!["Home"]);
    assert_eq!(tag_names(&service.get_file_tags("notes/a.md")), vec!["Home"]);
    assert_eq!(service.get_state().file_tags.len(), 1);
}

#[test]
fn test_assign_and_unassign() {
    let dir = TempDir::new().unwrap();
    let mut service = open_service(&dir, "laptop");
    let work = service.create_tag("Work", "#e53935", None).unwrap();

    service.add_file_tag("notes/a.md", &work).unwrap();
    assert_eq!(tag_names(&service.get_file_tags("notes/a.md")), vec!["Work"]);
    assert!(service.get_file_tags("notes/other.md").is_empty());

    service.remove_file_tag("notes/a.md", &work).unwrap();
    assert!(service.get_file_tags("notes/a.md").is_empty());
}

#[test]
fn test_repeated_assign_is_one_association() {
    let dir = TempDir::new().unwrap();
    let mut service = open_service(&dir, "laptop");
    let work = service.create_tag("Work", "#e53935", None).unwrap();

    service.add_file_tag("a.md", &work).unwrap();
    service.add_file_tag("a.md", &work).unwrap();

    let state = service.get_state();
    assert_eq!(state.file_tags.len(), 1);
    assert_eq!(local_log(dir.path(), "laptop").file_tag_log.len(), 2);
}

#[test]
fn test_unknown_tag_references_are_absorbed() {
    let dir = TempDir::new().unwrap();
    let mut service = open_service(&dir, "laptop");

    service.update_tag("missing", TagUpdate::name("X")).unwrap();
    service.delete_tag("missing").unwrap();
    service.add_file_tag("a.md", "missing").unwrap();
    service.remove_file_tag("a.md", "missing").unwrap();

    assert!(service.get_state().is_empty());
    assert_eq!(local_log(dir.path(), "laptop").len(), 4);
}

#[test]
fn test_file_tags_in_display_order() {
    let dir = TempDir::new().unwrap();
    let mut service = open_service(&dir, "laptop");
    let b = service.create_tag("B", "#e53935", Some(5)).unwrap();
    let a = service.create_tag("A", "#e53935", Some(1)).unwrap();

    service.add_file_tag("x.md", &b).unwrap();
    service.add_file_tag("x.md", &a).unwrap();

    assert_eq!(tag_names(&service.get_file_tags("x.md")), vec!["A", "B"]);
}
