#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Create a temp directory with a small complete wiki.
fn test_wiki() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("The_World.wiki"),
        "{{Infobox World\
         |map-name=Testland|image=Testland map.png\
         |map-width=2000|map-height=1500\
         |map-start-x=0|map-start-y=0\
         |zoom-start=1|zoom-max=3\
         |viewport-restricted=yes}}\n",
    )
    .unwrap();

    fs::create_dir(dir.path().join("scenes")).unwrap();
    fs::write(
        dir.path().join("scenes/The_Mill.wiki"),
        "{{Infobox Scene|name=The Mill|visitable=yes\
         |bg-image=Mill bg.png|bg-width=1600|bg-height=900|indoors=yes}}\n\
         {{Scene Interaction|name=cellar-door|default-state=shut\
         |action-use={{ActionMap|verb=Open\
         |1={{When|condition=flags.door-unlocked|action=open-door}}\
         |2={{When|action=rattle-door}}}}\
         |actions={{Actions\
         |open-door={{Action|1={{Narrate|The door swings open.}}|2={{MoveTo|Cellar}}}}\
         |rattle-door={{Action|1={{Narrate|Locked tight.}}}}}}\
         |states={{States\
         |shut={{State|tooltip=A cellar door|image=Door shut.png\
         |left=100|top=200|right=260|bottom=420|enabled=yes|visible=yes}}}}}}\n",
    )
    .unwrap();

    fs::create_dir(dir.path().join("characters")).unwrap();
    fs::write(
        dir.path().join("characters/Ana.wiki"),
        "{{Infobox Character|name=Ana|tooltip=The miller|speech-color=#aa3311|image=Ana.png}}\n\
         {{Dialogue|name=greeting|lines={{Lines\
         |1={{Line|Ana|Welcome to the mill.}}\
         |2={{Prompt|a={{Option|label=Thanks|result={{Lines|1={{Grant|greeted}}}}}}}}}}}}\n",
    )
    .unwrap();

    fs::create_dir(dir.path().join("items")).unwrap();
    fs::write(
        dir.path().join("items/Brass_Key.wiki"),
        "{{Infobox Item|name=Brass Key|inventory-tooltip=A small key|inventory-icon=Key icon.png}}\n",
    )
    .unwrap();

    fs::write(
        dir.path().join("images.json"),
        r#"{
  "Testland_map.png": "http://example/Testland_map.png",
  "Mill_bg.png": "http://example/Mill_bg.png",
  "Door_shut.png": "http://example/Door_shut.png",
  "Ana.png": "http://example/Ana.png",
  "Key_icon.png": "http://example/Key_icon.png"
}"#,
    )
    .unwrap();

    dir
}

fn pq() -> Command {
    Command::cargo_bin("pq").unwrap()
}

// ---------------------------------------------------------------------------
// build
// ---------------------------------------------------------------------------

#[test]
fn build_compiles_a_complete_wiki() {
    let dir = test_wiki();
    pq().args(["build", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Compiled 'Testland' successfully."))
        .stdout(predicate::str::contains(
            "1 scenes, 1 characters, 1 items, 5 images",
        ));
}

#[test]
fn build_fails_on_missing_world_page() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("scenes")).unwrap();
    fs::create_dir(dir.path().join("characters")).unwrap();
    fs::create_dir(dir.path().join("items")).unwrap();

    pq().args(["build", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Fatal error during compilation"))
        .stderr(predicate::str::contains("compilation failed with errors"));
}

#[test]
fn build_reports_structural_errors_in_pages() {
    let dir = test_wiki();
    fs::write(
        dir.path().join("characters/Bram.wiki"),
        "{{Infobox Character|name=Bram}}\n\
         {{Dialogue|name=bad|lines={{Lines|1={{Jump|a|b}}}}}}\n",
    )
    .unwrap();

    pq().args(["build", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Skipping dialogue in \"Bram\""));
}

#[test]
fn build_warns_about_inaccessible_catchall_tail() {
    let dir = test_wiki();
    fs::write(
        dir.path().join("scenes/Cellar.wiki"),
        "{{Infobox Scene|name=Cellar}}\n\
         {{Scene Interaction|name=crate\
         |action-inspect={{ActionMap\
         |1={{When|action=look}}\
         |2={{When|condition=flags.x|action=peek}}}}\
         |states={{States\
         |only={{State|tooltip=A crate|left=0|top=0|right=10|bottom=10\
         |enabled=yes|visible=yes}}}}}}\n",
    )
    .unwrap();

    pq().args(["build", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "1 mapped actions are inaccessible due to an earlier catchall condition",
        ));
}

#[test]
fn build_rejects_a_missing_directory() {
    pq().args(["build", "--dir", "/no/such/place"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_a_clean_wiki() {
    let dir = test_wiki();
    pq().args(["check", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed."));
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

#[test]
fn export_writes_json_to_stdout() {
    let dir = test_wiki();
    let output = pq()
        .args(["export", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["mapName"], "Testland");
    assert_eq!(json["viewportRestricted"], true);
    assert_eq!(json["scenes"][0]["name"], "The Mill");
    assert_eq!(
        json["scenes"][0]["interactions"][0]["actionMappings"]["Use"][0]["verb"],
        "Open"
    );
    assert_eq!(
        json["characters"][0]["dialogues"][0]["lines"][0]["event"],
        "line"
    );
    assert_eq!(
        json["imageRefs"]["Ana.png"],
        "http://example/Ana.png"
    );
}

#[test]
fn export_writes_json_to_a_file() {
    let dir = test_wiki();
    let out = dir.path().join("world.json");

    pq().args(["export", "--dir"])
        .arg(dir.path())
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["items"][0]["name"], "Brass Key");
    assert_eq!(json["items"][0]["inventoryIcon"], "Key icon.png");
}
