/// Page styles for the HTML rendering. Static: no search data ever flows in.
pub const STYLESHEET: &str = r#"<style type="text/css">
#search-prompt { padding-left: 2em; padding-bottom: 3em; }
#search-error { color: #b00020; }
h2 { font-family: monospace, monospace; margin-top: 40px; font-size: 22px; }
.search-results { font-family: Georgia, serif; list-style: none; font-size: 20px; padding-left: 10px; }
.search-results li { padding: .5em .3em; }
.search-results li:nth-child(odd) { background-color: #eee8e2; }
.search-results li a { text-decoration-color: #7b3d10; }
.search-debug { background: #fff; border: 1px solid #ccc; padding: 10px; margin: 10px 0; }
.search-debug pre { white-space: pre-wrap; max-height: 400px; overflow: auto; }
</style>
"#;
