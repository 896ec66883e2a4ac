/*!
 * Tests for the word-vector text feed
 */

use anyhow::Result;
use subdialogs::Controller;
use crate::common;

#[test]
fn test_sentences_withTaggedFile_shouldBlankBracesAndDropWatermarks() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(
        temp_dir.path(),
        "film.txt",
        "{1}{2}Hello {y:i}world\n{3}{4}napisy24",
    )?;

    let controller = Controller::with_config(common::test_config())?;
    let sentences: Vec<String> = controller.sentences(temp_dir.path())?.collect();

    assert_eq!(sentences, vec![" 1  2 Hello world".to_string()]);
    Ok(())
}

#[test]
fn test_sentences_withReset_shouldWalkDirectoryAgain() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_subtitle(temp_dir.path(), "a.txt", &["{1}{2}Pierwszy", "{3}{4}Drugi"])?;
    common::create_test_subtitle(temp_dir.path(), "b.txt", &["{5}{6}Trzeci"])?;

    let controller = Controller::with_config(common::test_config())?;
    let mut sentences = controller.sentences(temp_dir.path())?;

    let first_epoch: Vec<String> = sentences.by_ref().collect();
    assert_eq!(
        first_epoch,
        vec![
            " 1  2 Pierwszy\n 3  4 Drugi".to_string(),
            " 5  6 Trzeci".to_string()
        ]
    );
    assert!(sentences.next().is_none());

    sentences.reset();
    let second_epoch: Vec<String> = sentences.collect();
    assert_eq!(second_epoch, first_epoch);
    Ok(())
}

#[test]
fn test_sentences_withMissingDirectory_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(common::test_config())?;

    assert!(controller.sentences(temp_dir.path().join("missing")).is_err());
    Ok(())
}
