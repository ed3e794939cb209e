use notify::event::{
    AccessKind, AccessMode, CreateKind, DataChange, EventKind, MetadataKind, ModifyKind,
    RemoveKind, RenameMode,
};

use watchrun::watch::is_restart_event;

#[test]
fn create_write_remove_rename_restart() {
    assert!(is_restart_event(&EventKind::Create(CreateKind::File)));
    assert!(is_restart_event(&EventKind::Create(CreateKind::Folder)));
    assert!(is_restart_event(&EventKind::Remove(RemoveKind::File)));
    assert!(is_restart_event(&EventKind::Modify(ModifyKind::Data(
        DataChange::Content
    ))));
    assert!(is_restart_event(&EventKind::Modify(ModifyKind::Data(
        DataChange::Any
    ))));
    assert!(is_restart_event(&EventKind::Modify(ModifyKind::Name(
        RenameMode::Both
    ))));
    assert!(is_restart_event(&EventKind::Modify(ModifyKind::Name(
        RenameMode::From
    ))));
}

#[test]
fn unspecific_modify_restarts() {
    // Some platform backends only report Modify(Any) for content writes.
    assert!(is_restart_event(&EventKind::Modify(ModifyKind::Any)));
}

#[test]
fn access_and_metadata_are_ignored() {
    assert!(!is_restart_event(&EventKind::Access(AccessKind::Open(
        AccessMode::Read
    ))));
    assert!(!is_restart_event(&EventKind::Access(AccessKind::Close(
        AccessMode::Write
    ))));
    assert!(!is_restart_event(&EventKind::Modify(ModifyKind::Metadata(
        MetadataKind::Permissions
    ))));
    assert!(!is_restart_event(&EventKind::Modify(ModifyKind::Metadata(
        MetadataKind::Any
    ))));
    assert!(!is_restart_event(&EventKind::Any));
    assert!(!is_restart_event(&EventKind::Other));
}
