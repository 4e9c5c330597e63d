use serial_test::serial;
use slack_post_resource::utils::env_expand::expand;
use std::env;

#[test]
#[serial]
fn test_expand_reads_process_environment() {
    unsafe {
        env::set_var("SLACK_RESOURCE_TEST_BUILD", "1234");
        env::remove_var("SLACK_RESOURCE_TEST_UNSET");
    }

    let expanded = expand(
        "build $SLACK_RESOURCE_TEST_BUILD, literal '$SLACKRESOURCETESTBUILD', unset [$SLACK_RESOURCE_TEST_UNSET]",
    );
    assert_eq!(
        expanded,
        "build 1234, literal '$SLACKRESOURCETESTBUILD', unset []"
    );

    unsafe {
        env::remove_var("SLACK_RESOURCE_TEST_BUILD");
    }
}

#[test]
#[serial]
fn test_quoted_and_unquoted_forms_of_same_variable() {
    unsafe {
        env::set_var("SLACKTESTFOO", "value");
    }

    assert_eq!(
        expand("'$SLACKTESTFOO' vs $SLACKTESTFOO"),
        "'$SLACKTESTFOO' vs value"
    );

    unsafe {
        env::remove_var("SLACKTESTFOO");
    }
}
