#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const META: &str = r#"---
galaxy_info:
  role_name: web
  author: Ops Team
  description: Installs web server
  license: MIT
  min_ansible_version: "2.14"
  platforms:
    - name: Ubuntu
      versions:
        - jammy
    - name: Debian
      versions:
        - all
dependencies:
  - common
  - role: geerlingguy.firewall
    version: 2.5.0
"#;

pub const DEFAULTS: &str = r#"---
port: 8080
db:
  host: localhost
  name: app
packages:
  - nginx
  - curl
"#;

pub const VARS: &str = "---\nport: 443\nserver_name: example.org\n";

pub const TASKS: &str = r#"---
- name: Install package
  ansible.builtin.apt:
    name: "{{ packages }}"
    state: present
  tags: [web, packages]
- ansible.builtin.template:
    src: nginx.conf.j2
    dest: /etc/nginx/nginx.conf
  notify: restart nginx
- name: Include TLS setup
  ansible.builtin.include_tasks: tls.yml
"#;

pub const TLS_TASKS: &str = "- name: Copy certificate\n  copy: {src: cert.pem, dest: /etc/ssl/cert.pem}\n  tags: tls\n";

pub const HANDLERS: &str = r#"---
- name: restart nginx
  ansible.builtin.service:
    name: nginx
    state: restarted
  listen: web restart
"#;

/// Temporary workspace holding a role directory and a log directory
pub struct RoleFixture {
    _tmp: TempDir,
    pub root: PathBuf,
    pub role: PathBuf,
    pub logs: PathBuf,
}

impl RoleFixture {
    /// Empty role directory named `web`
    pub fn empty() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().to_path_buf();
        let role = root.join("web");
        fs::create_dir_all(&role).expect("create role dir");
        Self {
            logs: root.join("logs"),
            root,
            role,
            _tmp: tmp,
        }
    }

    /// Role with every standard directory and file populated
    pub fn complete() -> Self {
        let fixture = Self::empty();
        fixture.write("meta/main.yml", META);
        fixture.write("defaults/main.yml", DEFAULTS);
        fixture.write("vars/main.yml", VARS);
        fixture.write("tasks/main.yml", TASKS);
        fixture.write("tasks/tls.yml", TLS_TASKS);
        fixture.write("handlers/main.yml", HANDLERS);
        fixture.mkdir("templates");
        fixture.mkdir("files");
        fixture
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.role.join(rel);
        fs::create_dir_all(path.parent().unwrap()).expect("create parent dir");
        fs::write(path, content).expect("write role file");
    }

    pub fn mkdir(&self, rel: &str) {
        fs::create_dir_all(self.role.join(rel)).expect("create dir");
    }

    pub fn doc_path(&self) -> PathBuf {
        self.role.join("DOCUMENTATION.md")
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).expect("read file")
    }
}
