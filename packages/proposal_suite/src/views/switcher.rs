// Page script. Region elements are never created or removed here: a switch
// only toggles the `active` class so every embedded assistant stays loaded.
pub const JAVASCRIPT: &str = r#"
    (function () {
        const label = document.getElementById('active-assistant-label');

        function applyVisibility(regions) {
            regions.forEach(region => {
                const container = document.getElementById(region.id);
                if (!container) return;
                container.classList.toggle('active', region.visible);
                container.setAttribute('aria-hidden', region.visible ? 'false' : 'true');
            });
        }

        function applySelection(snapshot) {
            applyVisibility(snapshot.regions);
            document.querySelectorAll('.nav-button').forEach(button => {
                const active = button.dataset.assistant === snapshot.selected;
                button.classList.toggle('active', active);
                button.setAttribute('aria-pressed', active ? 'true' : 'false');
            });
            if (label) {
                label.textContent = snapshot.label;
            }
        }

        // Selections go to the server one at a time, in click order, and only
        // the reply to the newest click touches the DOM. The page then always
        // matches the last select the server applied.
        let queue = Promise.resolve();
        let latest = 0;

        async function resync(seq) {
            try {
                const response = await fetch('/api/selection', { credentials: 'same-origin' });
                if (response.ok && seq === latest) applySelection(await response.json());
            } catch (err) {
                console.error('Failed to reload selection:', err);
            }
        }

        async function postSelection(name, seq) {
            try {
                const response = await fetch('/api/selection', {
                    method: 'POST',
                    credentials: 'same-origin',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ name })
                });
                const body = await response.json();
                if (seq !== latest) return;
                if (response.ok) {
                    applySelection(body);
                } else {
                    console.warn('Selection rejected:', body.message);
                    if (body.current) applySelection(body.current);
                }
            } catch (err) {
                console.error('Failed to switch assistant:', err);
                if (seq === latest) await resync(seq);
            }
        }

        function selectAssistant(name) {
            const seq = ++latest;
            queue = queue.then(() => postSelection(name, seq));
            return queue;
        }

        document.querySelectorAll('.nav-button').forEach(button => {
            button.addEventListener('click', () => selectAssistant(button.dataset.assistant));
        });
    })();
"#;
