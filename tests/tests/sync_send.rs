use tests::models;

use tessel::prelude::*;
use tessel::Db;

fn assert_sync_send<T: Send + Sync>(val: T) -> T {
    val
}

fn assert_send<T: Send>(val: T) -> T {
    val
}

struct User;

impl Model for User {
    const NAME: &'static str = "User";

    fn declare(model: &mut Declaration) -> tessel::Result<()> {
        model.value("email", "STRING");
        Ok(())
    }
}

#[tokio::test]
async fn ensure_types_sync_send() {
    let db: Db = assert_sync_send(models!(User).build(tests::RecordingEngine::new()).unwrap());

    let handle = assert_sync_send(db.get::<User>().unwrap().clone());
    assert_eq!(handle.name(), "User");

    assert_send(db.authenticate()).await.unwrap();
}
