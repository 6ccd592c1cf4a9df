pub mod emacs;
